//! Decides where each document's component goes and what it is called.

use std::path::{Path, PathBuf};

use crate::contract::Category;
use crate::transform::capitalize_words;

pub const GUIDES_PREFIX: &str = "guides/";
pub const PACKAGES_PREFIX: &str = "packages/";
pub const PACKAGES_SUBDIR: &str = "packages";
pub const COMPONENT_EXTENSION: &str = "tsx";

/// Result of [`plan_output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub category: Category,
    /// Component and export name, e.g. `SetupIntro` or `RouterPackage`.
    pub identifier: String,
    /// Output file name without extension: `index`, or the capitalized file stem.
    pub file_stem: String,
    pub output_dir: PathBuf,
    pub output_path: PathBuf,
}

/// Plan the output of the document at `relative_path` (e.g. `guides/setup/intro.md`).
pub fn plan_output(relative_path: &str, output_root: &Path) -> PlannedOutput {
    let stem = file_stem(relative_path);

    if relative_path.starts_with(PACKAGES_PREFIX) {
        let file_stem = capitalize_words(stem);
        let output_dir = output_root.join(PACKAGES_SUBDIR);
        return PlannedOutput {
            category: Category::Package,
            identifier: format!("{file_stem}Package"),
            output_path: output_dir.join(format!("{file_stem}.{COMPONENT_EXTENSION}")),
            output_dir,
            file_stem,
        };
    }

    let guide_path = relative_path.strip_prefix(GUIDES_PREFIX).unwrap_or(relative_path);
    let guide_path = guide_path.strip_suffix(".md").unwrap_or(guide_path);
    let parts: Vec<&str> = guide_path.split('/').collect();
    let nested = parts.len() > 1;
    let is_index = stem == "index";

    let mut identifier: String = if is_index && nested {
        capitalize_words(parts[0])
    } else {
        parts
            .iter()
            .map(|part| if *part == "index" { String::new() } else { capitalize_words(part) })
            .collect()
    };
    // A top-level index would otherwise export an empty name.
    if identifier.is_empty() {
        identifier = capitalize_words(stem);
    }

    let (output_dir, file_stem) = if nested {
        let file_stem = if is_index { "index".to_string() } else { capitalize_words(stem) };
        (output_root.join(parts[0]), file_stem)
    } else {
        (output_root.to_path_buf(), capitalize_words(stem))
    };

    PlannedOutput {
        category: Category::Guide,
        identifier,
        output_path: output_dir.join(format!("{file_stem}.{COMPONENT_EXTENSION}")),
        output_dir,
        file_stem,
    }
}

fn file_stem(relative_path: &str) -> &str {
    let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    name.strip_suffix(".md").unwrap_or(name)
}
