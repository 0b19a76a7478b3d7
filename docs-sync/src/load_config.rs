//! `load_config` module: loads the optional YAML config file and merges it with
//! CLI flags and the environment into the core's `SiteConfig` / `PackagesConfig`.
//!
//! Precedence, highest first: environment (`DOCS_SITE_OUTPUT`), CLI flags,
//! config file, built-in defaults.
//!
//! # Errors
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.
//!
//! Accepted YAML:
//!
//! ```yaml
//! site:
//!   docs_dir: .
//!   output_dir: ../site/src/pages/docs
//!   clean: true
//! packages:
//!   repo_root: .
//!   strict: false
//!   generator_command: "docs-sync packages"
//!   targets:
//!     - group: core
//!       output_file_name: core.md
//!       source_url: https://example.com/core/README.md
//! ```
use anyhow::{bail, Result};
use docs_sync_core::config::{PackagesConfig, SiteConfig};
use docs_sync_core::contract::SyncTarget;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub packages: PackagesSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct SiteSection {
    pub docs_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub clean: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PackagesSection {
    pub repo_root: Option<PathBuf>,
    pub strict: Option<bool>,
    pub generator_command: Option<String>,
    pub targets: Option<Vec<SyncTarget>>,
}

/// Loads a static YAML config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file is a valid, empty config.
    if config_content.trim().is_empty() {
        return Ok(CliConfig::default());
    }

    match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Load the file when one was given, otherwise start from defaults.
pub fn load_optional(path: Option<&Path>) -> Result<CliConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(CliConfig::default()),
    }
}

/// Flag overrides for the `site` command.
#[derive(Debug, Default)]
pub struct SiteOverrides {
    pub docs_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub no_clean: bool,
}

pub fn site_config(file: &SiteSection, flags: SiteOverrides, cwd: &Path) -> SiteConfig {
    let docs_dir = flags
        .docs_dir
        .or_else(|| file.docs_dir.clone())
        .unwrap_or_else(|| cwd.to_path_buf());
    let mut config = SiteConfig::resolve(docs_dir, flags.output.or_else(|| file.output_dir.clone()));
    config.clean = !flags.no_clean && file.clean.unwrap_or(true);
    config.trace_loaded();
    config
}

/// Flag overrides for the `packages` command.
#[derive(Debug, Default)]
pub struct PackagesOverrides {
    pub repo_root: Option<PathBuf>,
    pub allow_missing: bool,
    pub only: Vec<String>,
}

pub fn packages_config(
    file: &PackagesSection,
    flags: PackagesOverrides,
    cwd: &Path,
) -> Result<PackagesConfig> {
    let repo_root = flags
        .repo_root
        .or_else(|| file.repo_root.clone())
        .unwrap_or_else(|| cwd.to_path_buf());
    let mut config = PackagesConfig::new(repo_root);

    config.strict = !flags.allow_missing && file.strict.unwrap_or(true);
    if let Some(command) = &file.generator_command {
        config.generator_command = command.clone();
    }
    if let Some(targets) = &file.targets {
        config.targets = targets.clone();
    }

    if !flags.only.is_empty() {
        for group in &flags.only {
            if !config.targets.iter().any(|t| &t.group == group) {
                error!(group = %group, "Unknown sync target group");
                bail!("Unknown sync target group: {group}");
            }
        }
        config.targets.retain(|t| flags.only.contains(&t.group));
    }

    config.trace_loaded();
    Ok(config)
}
