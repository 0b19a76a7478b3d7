//! # contract: shared data types, error types and the I/O seams of the pipeline
//!
//! The pipeline talks to the outside world through two traits:
//! - [`TextFetcher`] fetches the raw text behind a URL (the package mirror).
//! - [`DocWriter`] creates directories and writes generated files.
//!
//! Both are annotated for `mockall`, so tests can record call order or fail a
//! single call without touching the network or the disk. Real implementations
//! live in [`crate::download`] and [`crate::output`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A markdown source file, as read from the documentation tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the documentation root, `/`-separated (e.g. `guides/setup/intro.md`).
    pub relative_path: String,
    pub raw_content: String,
}

/// Title and description of a document, from frontmatter or the heading heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Guide,
    Package,
}

/// One generated page component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedUnit {
    pub identifier: String,
    pub export_name: String,
    pub output_path: PathBuf,
    pub category: Category,
}

/// An external markdown source mirrored into `packages/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTarget {
    pub group: String,
    pub output_file_name: String,
    pub source_url: String,
}

/// Error type for [`TextFetcher`] (boxed, like the other trait seams).
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum SiteBuildError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("more than one document maps to {}", .0.display())]
    DuplicateOutput(PathBuf),
    #[error("more than one document exports {0}")]
    DuplicateExport(String),
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fetches the text behind a URL.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Writes generated output. Implemented by [`crate::output::FsWriter`] and by mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocWriter: Send + Sync {
    /// Create `path` and its parents. An existing directory is not an error.
    async fn ensure_dir(&self, path: &Path) -> std::io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    async fn write_file(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}
