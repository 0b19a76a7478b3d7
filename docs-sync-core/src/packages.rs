//! Mirrors package READMEs from their repositories into `packages/*.md`.
//!
//! Targets are fetched one at a time, in list order. Each fetched document is
//! wrapped in a banner naming the command that generated it and the URL it
//! came from, then written to `<repo_root>/packages/<output_file_name>`.
//!
//! In strict mode (the default) the first failed fetch aborts the run; in
//! non-strict mode the target is skipped and nothing is written for it.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::PackagesConfig;
use crate::contract::{DocWriter, SyncError, SyncTarget, TextFetcher};

pub const DEFAULT_GENERATOR_COMMAND: &str = "docs-sync packages";
pub const PACKAGES_DIR: &str = "packages";

/// Compile-time form of a [`SyncTarget`].
#[derive(Debug, Clone, Copy)]
pub struct StaticSyncTarget {
    pub group: &'static str,
    pub output_file_name: &'static str,
    pub source_url: &'static str,
}

impl StaticSyncTarget {
    pub fn to_target(&self) -> SyncTarget {
        SyncTarget {
            group: self.group.to_string(),
            output_file_name: self.output_file_name.to_string(),
            source_url: self.source_url.to_string(),
        }
    }
}

/// Every package whose documentation is mirrored, in fetch order.
pub const SYNC_TARGETS: &[StaticSyncTarget] = &[
    StaticSyncTarget {
        group: "core",
        output_file_name: "core.md",
        source_url: "https://raw.githubusercontent.com/bunary-dev/core/main/README.md",
    },
    StaticSyncTarget {
        group: "http",
        output_file_name: "http.md",
        source_url: "https://raw.githubusercontent.com/bunary-dev/http/main/README.md",
    },
    StaticSyncTarget {
        group: "orm",
        output_file_name: "orm.md",
        source_url: "https://raw.githubusercontent.com/bunary-dev/orm/main/README.md",
    },
    StaticSyncTarget {
        group: "auth",
        output_file_name: "auth.md",
        source_url: "https://raw.githubusercontent.com/bunary-dev/auth/main/README.md",
    },
    StaticSyncTarget {
        group: "cli",
        output_file_name: "cli.md",
        source_url: "https://raw.githubusercontent.com/bunary-dev/cli/main/README.md",
    },
];

/// Summary of a sync run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub written: Vec<PathBuf>,
    /// Source URLs whose fetch failed in non-strict mode.
    pub skipped: Vec<String>,
}

/// Wrap fetched markdown in the generated-file banner.
///
/// Pure and deterministic. The markdown is embedded byte for byte with one
/// exception: a run of trailing newlines collapses to exactly one, so
/// `"x\n\n"` is embedded as `"x\n"`. Markdown ending in a single newline, or
/// in none, appears literally.
pub fn render_synced_package_markdown(
    generator_command: &str,
    source_url: &str,
    source_markdown: &str,
) -> String {
    format!(
        "<!--\n  AUTO-GENERATED FILE. DO NOT EDIT.\n  Generated by: {generator_command}\n  Source: {source_url}\n-->\n\n{}\n",
        source_markdown.trim_end_matches('\n')
    )
}

/// Fetch every configured target in order and write it under `packages/`.
pub async fn sync_packages<F, W>(
    config: &PackagesConfig,
    fetcher: &F,
    writer: &W,
) -> Result<SyncReport, SyncError>
where
    F: TextFetcher + ?Sized,
    W: DocWriter + ?Sized,
{
    info!(
        targets = config.targets.len(),
        strict = config.strict,
        "Starting package docs sync"
    );
    let out_dir = config.repo_root.join(PACKAGES_DIR);
    let mut report = SyncReport::default();

    for target in &config.targets {
        let markdown = match fetcher.fetch_text(&target.source_url).await {
            Ok(text) => text,
            Err(e) if !config.strict => {
                warn!(group = %target.group, url = %target.source_url, error = %e, "Skipping missing source");
                report.skipped.push(target.source_url.clone());
                continue;
            }
            Err(e) => {
                error!(group = %target.group, url = %target.source_url, error = %e, "Fetch failed");
                return Err(SyncError::Fetch {
                    url: target.source_url.clone(),
                    source: e,
                });
            }
        };

        let path = out_dir.join(&target.output_file_name);
        let contents =
            render_synced_package_markdown(&config.generator_command, &target.source_url, &markdown);
        writer.write_file(&path, &contents).await.map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to write package docs");
            SyncError::Write {
                path: path.clone(),
                source: e,
            }
        })?;
        info!(group = %target.group, path = %path.display(), "Synced package docs");
        report.written.push(path);
    }

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Package docs sync complete"
    );
    Ok(report)
}
