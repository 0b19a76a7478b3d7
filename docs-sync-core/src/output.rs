//! Filesystem implementation of [`DocWriter`].

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::contract::DocWriter;

/// Writes generated files with `tokio::fs`, creating parent directories as needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

#[async_trait]
impl DocWriter for FsWriter {
    async fn ensure_dir(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(path).await?;
        debug!(path = %path.display(), "Ensured directory");
        Ok(())
    }

    async fn write_file(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
        debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(())
    }
}
