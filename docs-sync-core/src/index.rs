//! The `index.ts` manifest re-exporting every generated page.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::contract::{Category, DocWriter, ProcessedUnit, SiteBuildError};

pub const INDEX_FILE_NAME: &str = "index.ts";
const LAYOUT_EXPORT: &str = r#"export { default as DocsLayout } from "./DocsLayout.js";"#;

/// Render the manifest. Guides come first, then packages, each sorted by
/// identifier with byte-wise comparison so traversal order never leaks into
/// the output.
pub fn render_index(units: &[ProcessedUnit], output_root: &Path) -> String {
    let mut guides: Vec<&ProcessedUnit> = units
        .iter()
        .filter(|u| u.category == Category::Guide)
        .collect();
    let mut packages: Vec<&ProcessedUnit> = units
        .iter()
        .filter(|u| u.category == Category::Package)
        .collect();
    guides.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    packages.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    let mut exports: Vec<String> = guides
        .iter()
        .map(|unit| export_line(unit, output_root))
        .collect();
    if !packages.is_empty() {
        exports.push(String::new());
        exports.extend(packages.iter().map(|unit| export_line(unit, output_root)));
    }

    format!(
        "/**\n * Documentation pages - auto-generated. Do not edit directly.\n */\n\n{LAYOUT_EXPORT}\n\n{}\n",
        exports.join("\n")
    )
}

fn export_line(unit: &ProcessedUnit, output_root: &Path) -> String {
    format!(
        r#"export {{ default as {} }} from "./{}";"#,
        unit.export_name,
        import_path(&unit.output_path, output_root)
    )
}

/// Path of a generated component relative to the output root, as an ESM import (`.js`).
fn import_path(output_path: &Path, output_root: &Path) -> String {
    let relative = output_path.strip_prefix(output_root).unwrap_or(output_path);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");
    match joined.strip_suffix(".tsx") {
        Some(stem) => format!("{stem}.js"),
        None => joined,
    }
}

/// Render and write `<output_root>/index.ts`.
pub async fn write_index<W>(
    units: &[ProcessedUnit],
    output_root: &Path,
    writer: &W,
) -> Result<PathBuf, SiteBuildError>
where
    W: DocWriter + ?Sized,
{
    let path = output_root.join(INDEX_FILE_NAME);
    let contents = render_index(units, output_root);
    writer.write_file(&path, &contents).await.map_err(|e| {
        error!(error = ?e, path = %path.display(), "Failed to write index");
        SiteBuildError::Write {
            path: path.clone(),
            source: e,
        }
    })?;
    info!(path = %path.display(), units = units.len(), "Generated index");
    Ok(path)
}
