//! Site build: turns `guides/` and `packages/` markdown into page components.
//!
//! The build walks both source roots depth-first, runs every markdown file
//! through [`parse_frontmatter`] → [`plan_output`] → [`render_component`],
//! writes the result, and finally writes the `index.ts` manifest.
//!
//! Generated units are collected into the returned [`BuildReport`]; nothing is
//! kept between runs. Traversal follows directory-listing order, and the index
//! sorts explicitly, so the output does not depend on that order.
//!
//! Any read or write failure stops the build.

use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, error, info};

use crate::config::SiteConfig;
use crate::contract::{DocWriter, Document, ProcessedUnit, SiteBuildError};
use crate::frontmatter::parse_frontmatter;
use crate::index::write_index;
use crate::planner::{plan_output, PlannedOutput};
use crate::transform::render_component;

/// Source roots under the documentation directory, processed in this order.
pub const SOURCE_ROOTS: [&str; 2] = ["guides", "packages"];
/// Hand-written files in the output root that survive cleaning.
pub const PRESERVED_FILES: [&str; 2] = ["DocsLayout.tsx", "DocsLayout.ts"];

#[derive(Debug)]
pub struct BuildReport {
    pub units: Vec<ProcessedUnit>,
    pub index_path: PathBuf,
}

/// A rendered component and where it goes.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub plan: PlannedOutput,
    pub contents: String,
}

impl GeneratedPage {
    pub fn to_unit(&self) -> ProcessedUnit {
        ProcessedUnit {
            identifier: self.plan.identifier.clone(),
            export_name: self.plan.identifier.clone(),
            output_path: self.plan.output_path.clone(),
            category: self.plan.category,
        }
    }
}

/// Parse, plan and render one document. No I/O.
pub fn generate_page(document: &Document, output_root: &Path) -> GeneratedPage {
    let file_stem = Path::new(&document.relative_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parsed = parse_frontmatter(&document.raw_content, &file_stem);
    let plan = plan_output(&document.relative_path, output_root);
    let contents = render_component(&parsed.metadata, &parsed.body, &plan.identifier);
    GeneratedPage { plan, contents }
}

/// Run a full site build.
pub async fn build_site<W>(config: &SiteConfig, writer: &W) -> Result<BuildReport, SiteBuildError>
where
    W: DocWriter + ?Sized,
{
    info!(
        source = %config.docs_dir.display(),
        output = %config.output_dir.display(),
        "Building docs for site"
    );

    prepare_output_dir(&config.output_dir, config.clean, writer).await?;

    let mut units = Vec::new();
    for root in SOURCE_ROOTS {
        let dir = config.docs_dir.join(root);
        process_directory(&dir, root.to_string(), &config.output_dir, writer, &mut units).await?;
    }

    let index_path = write_index(&units, &config.output_dir, writer).await?;
    info!(files = units.len(), "Site docs build complete");
    Ok(BuildReport { units, index_path })
}

/// Create the output root, or empty it apart from [`PRESERVED_FILES`].
pub async fn prepare_output_dir<W>(
    output_root: &Path,
    clean: bool,
    writer: &W,
) -> Result<(), SiteBuildError>
where
    W: DocWriter + ?Sized,
{
    let exists = tokio::fs::try_exists(output_root)
        .await
        .map_err(read_error(output_root))?;
    if !exists {
        writer
            .ensure_dir(output_root)
            .await
            .map_err(write_error(output_root))?;
        debug!(path = %output_root.display(), "Created output directory");
        return Ok(());
    }
    if !clean {
        return Ok(());
    }

    let mut entries = tokio::fs::read_dir(output_root)
        .await
        .map_err(read_error(output_root))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(read_error(output_root))?
    {
        let name = entry.file_name();
        if PRESERVED_FILES.iter().any(|keep| name == *keep) {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type().await.map_err(read_error(&path))?;
        let removed = if file_type.is_dir() {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };
        removed.map_err(write_error(&path))?;
        debug!(path = %path.display(), "Removed previous output");
    }
    Ok(())
}

fn process_directory<'a, W>(
    dir: &'a Path,
    relative: String,
    output_root: &'a Path,
    writer: &'a W,
    units: &'a mut Vec<ProcessedUnit>,
) -> BoxFuture<'a, Result<(), SiteBuildError>>
where
    W: DocWriter + ?Sized,
{
    async move {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(read_error(dir))?;
        while let Some(entry) = entries.next_entry().await.map_err(read_error(dir))? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            let relative_path = format!("{relative}/{name}");
            let file_type = entry.file_type().await.map_err(read_error(&path))?;

            if file_type.is_dir() {
                process_directory(&path, relative_path, output_root, writer, units).await?;
            } else if name.ends_with(".md") {
                let unit = process_file(&path, relative_path, output_root, writer, units).await?;
                units.push(unit);
            }
        }
        Ok(())
    }
    .boxed()
}

async fn process_file<W>(
    path: &Path,
    relative_path: String,
    output_root: &Path,
    writer: &W,
    seen: &[ProcessedUnit],
) -> Result<ProcessedUnit, SiteBuildError>
where
    W: DocWriter + ?Sized,
{
    let raw_content = tokio::fs::read_to_string(path)
        .await
        .map_err(read_error(path))?;
    let document = Document {
        relative_path,
        raw_content,
    };
    let page = generate_page(&document, output_root);
    let output_path = &page.plan.output_path;

    if seen.iter().any(|u| &u.output_path == output_path) {
        error!(
            source = %document.relative_path,
            path = %output_path.display(),
            "Output path already generated in this run"
        );
        return Err(SiteBuildError::DuplicateOutput(output_path.clone()));
    }
    let identifier = &page.plan.identifier;
    if seen.iter().any(|u| &u.export_name == identifier) {
        error!(
            source = %document.relative_path,
            export = %identifier,
            "Export name already generated in this run"
        );
        return Err(SiteBuildError::DuplicateExport(identifier.clone()));
    }

    writer
        .ensure_dir(&page.plan.output_dir)
        .await
        .map_err(write_error(&page.plan.output_dir))?;
    writer
        .write_file(output_path, &page.contents)
        .await
        .map_err(write_error(output_path))?;

    let unit = page.to_unit();
    info!("Generated {}", output_path.display());
    match serde_json::to_string(&unit) {
        Ok(json) => debug!(json = %json, "Processed unit"),
        Err(e) => error!(error = ?e, "Failed to serialize processed unit"),
    }
    Ok(unit)
}

fn read_error(path: &Path) -> impl FnOnce(std::io::Error) -> SiteBuildError + '_ {
    move |source| {
        error!(error = ?source, path = %path.display(), "Read failed");
        SiteBuildError::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> SiteBuildError + '_ {
    move |source| {
        error!(error = ?source, path = %path.display(), "Write failed");
        SiteBuildError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
