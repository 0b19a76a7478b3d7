use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::contract::SyncTarget;
use crate::packages::{DEFAULT_GENERATOR_COMMAND, SYNC_TARGETS};

/// Environment variable overriding the site output root.
pub const OUTPUT_ENV_VAR: &str = "DOCS_SITE_OUTPUT";

/// Site build: where the markdown lives and where the components go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub docs_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Remove previous output (except the hand-written layout) before building.
    pub clean: bool,
}

impl SiteConfig {
    /// Output root resolution: `DOCS_SITE_OUTPUT`, then `output_dir`, then
    /// `<docs_dir>/../site/src/pages/docs`.
    pub fn resolve(docs_dir: PathBuf, output_dir: Option<PathBuf>) -> Self {
        let output_dir = std::env::var_os(OUTPUT_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(output_dir)
            .unwrap_or_else(|| default_output_dir(&docs_dir));
        Self {
            docs_dir,
            output_dir,
            clean: true,
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            docs_dir = %self.docs_dir.display(),
            output_dir = %self.output_dir.display(),
            clean = self.clean,
            "Loaded SiteConfig"
        );
        debug!(?self, "SiteConfig loaded (full debug)");
    }
}

pub fn default_output_dir(docs_dir: &Path) -> PathBuf {
    docs_dir.join("..").join("site").join("src").join("pages").join("docs")
}

/// Package docs mirror settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagesConfig {
    pub repo_root: PathBuf,
    /// Abort on the first failed fetch. When false, failed targets are skipped.
    pub strict: bool,
    /// Command string shown in the generated banner.
    pub generator_command: String,
    pub targets: Vec<SyncTarget>,
}

impl PackagesConfig {
    pub fn new(repo_root: PathBuf) -> Self {
        Self {
            repo_root,
            strict: true,
            generator_command: DEFAULT_GENERATOR_COMMAND.to_string(),
            targets: SYNC_TARGETS.iter().map(|t| t.to_target()).collect(),
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            repo_root = %self.repo_root.display(),
            strict = self.strict,
            targets_count = self.targets.len(),
            "Loaded PackagesConfig"
        );
        debug!(?self, "PackagesConfig loaded (full debug)");
    }
}
