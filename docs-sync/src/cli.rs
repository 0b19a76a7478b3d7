//! This module implements the CLI interface for docs-sync: command parsing,
//! config merging and the async entrypoint.
//!
//! All pipeline logic lives in the [`docs-sync-core`] crate; this module is
//! only glue.
//!
//! ## How To Use
//! - From the shell: `docs-sync site` or `docs-sync packages`, see `--help`.
//! - From tests: call [`run`] with a constructed [`Cli`].
//!
//! [`docs-sync-core`]: ../../docs-sync-core/
use crate::load_config::{
    load_optional, packages_config, site_config, PackagesOverrides, SiteOverrides,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use docs_sync_core::download::HttpFetcher;
use docs_sync_core::output::FsWriter;
use docs_sync_core::packages::sync_packages;
use docs_sync_core::site::build_site;
use std::path::PathBuf;

/// CLI for docs-sync: build site pages from markdown and mirror package docs.
#[derive(Parser)]
#[clap(
    name = "docs-sync",
    version,
    about = "Build documentation site pages from markdown and mirror package READMEs"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert guides/ and packages/ markdown into site page components
    Site {
        /// Path to the YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// Documentation root containing guides/ and packages/ (default: current directory)
        #[clap(long)]
        docs_dir: Option<PathBuf>,
        /// Output root for generated components (DOCS_SITE_OUTPUT takes precedence)
        #[clap(long)]
        output: Option<PathBuf>,
        /// Keep previously generated files in the output root
        #[clap(long)]
        no_clean: bool,
    },
    /// Fetch package READMEs into packages/*.md
    Packages {
        /// Path to the YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// Repository root; files are written to <repo-root>/packages (default: current directory)
        #[clap(long)]
        repo_root: Option<PathBuf>,
        /// Skip sources that fail to fetch instead of aborting
        #[clap(long)]
        allow_missing: bool,
        /// Only sync the given target groups
        #[clap(long = "only")]
        only: Vec<String>,
    },
}

/// Async CLI entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Site {
            config,
            docs_dir,
            output,
            no_clean,
        } => {
            let file = load_optional(config.as_deref())?;
            let site = site_config(
                &file.site,
                SiteOverrides {
                    docs_dir,
                    output,
                    no_clean,
                },
                &cwd,
            );
            tracing::info!(command = "site", "Starting site build");
            match build_site(&site, &FsWriter).await {
                Ok(report) => {
                    tracing::info!(command = "site", files = report.units.len(), "Site build complete");
                    println!(
                        "Site docs build complete ({} files, index at {})",
                        report.units.len(),
                        report.index_path.display()
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "site", error = %e, "Site build failed");
                    Err(e.into())
                }
            }
        }
        Commands::Packages {
            config,
            repo_root,
            allow_missing,
            only,
        } => {
            let file = load_optional(config.as_deref())?;
            let packages = packages_config(
                &file.packages,
                PackagesOverrides {
                    repo_root,
                    allow_missing,
                    only,
                },
                &cwd,
            )?;
            tracing::info!(command = "packages", "Starting package docs sync");
            let fetcher = HttpFetcher::new();
            match sync_packages(&packages, &fetcher, &FsWriter).await {
                Ok(report) => {
                    tracing::info!(command = "packages", ?report, "Package docs sync complete");
                    println!(
                        "Package docs sync complete ({} written, {} skipped)",
                        report.written.len(),
                        report.skipped.len()
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "packages", error = %e, "Package docs sync failed");
                    Err(e.into())
                }
            }
        }
    }
}
