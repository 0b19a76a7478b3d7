use std::fs;
use std::path::Path;

use docs_sync_core::config::SiteConfig;
use docs_sync_core::contract::{Category, MockDocWriter, SiteBuildError};
use docs_sync_core::output::FsWriter;
use docs_sync_core::site::build_site;
use tempfile::{tempdir, TempDir};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A documentation tree with nested guides, an index page and two packages.
fn docs_tree() -> TempDir {
    let tmp = tempdir().unwrap();
    let docs = tmp.path().join("docs");
    write(&docs, "guides/getting-started.md", "---\ntitle: Getting Started\ndescription: \"Install and run\"\n---\n# Getting Started\n\nInstall and run\n\nRun `bun add`.\n");
    write(&docs, "guides/setup/index.md", "# Setup\n\nConfigure your app.\n");
    write(&docs, "guides/setup/intro.md", "# Intro\n\nStart here.\n\n## Steps\n\nUse ${env}.\n");
    write(&docs, "guides/setup/notes.txt", "ignored");
    write(&docs, "packages/router.md", "# Router\n\nFast routing.\n");
    write(&docs, "packages/http-server.md", "# HTTP\n\nServe.\n");
    tmp
}

fn config_for(tmp: &TempDir) -> SiteConfig {
    SiteConfig {
        docs_dir: tmp.path().join("docs"),
        output_dir: tmp.path().join("site"),
        clean: true,
    }
}

#[tokio::test]
async fn builds_components_and_index() {
    let tmp = docs_tree();
    let config = config_for(&tmp);

    let report = build_site(&config, &FsWriter).await.expect("build should succeed");

    assert_eq!(report.units.len(), 5);
    let out = &config.output_dir;
    for file in [
        "GettingStarted.tsx",
        "setup/index.tsx",
        "setup/Intro.tsx",
        "packages/Router.tsx",
        "packages/HttpServer.tsx",
    ] {
        assert!(out.join(file).is_file(), "missing {file}");
    }
    assert!(!out.join("setup/Notes.tsx").exists());

    let intro = fs::read_to_string(out.join("setup/Intro.tsx")).unwrap();
    assert!(intro.contains("const SetupIntro = () => {"));
    assert!(intro.contains("Use \\${env}."));
    assert!(intro.contains("const markdown = `## Steps\n"));

    let started = fs::read_to_string(out.join("GettingStarted.tsx")).unwrap();
    assert!(started.contains("const markdown = `Run \\`bun add\\`.\n`;"));

    let index = fs::read_to_string(&report.index_path).unwrap();
    let expected = r#"/**
 * Documentation pages - auto-generated. Do not edit directly.
 */

export { default as DocsLayout } from "./DocsLayout.js";

export { default as GettingStarted } from "./GettingStarted.js";
export { default as Setup } from "./setup/index.js";
export { default as SetupIntro } from "./setup/Intro.js";

export { default as HttpServerPackage } from "./packages/HttpServer.js";
export { default as RouterPackage } from "./packages/Router.js";
"#;
    assert_eq!(index, expected);

    let packages = report
        .units
        .iter()
        .filter(|u| u.category == Category::Package)
        .count();
    assert_eq!(packages, 2);
}

#[tokio::test]
async fn rebuild_is_byte_identical() {
    let tmp = docs_tree();
    let config = config_for(&tmp);

    build_site(&config, &FsWriter).await.unwrap();
    let first = fs::read_to_string(config.output_dir.join("index.ts")).unwrap();
    build_site(&config, &FsWriter).await.unwrap();
    let second = fs::read_to_string(config.output_dir.join("index.ts")).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn cleaning_keeps_layout_and_drops_stale_output() {
    let tmp = docs_tree();
    let config = config_for(&tmp);
    write(&config.output_dir, "DocsLayout.tsx", "layout");
    write(&config.output_dir, "old/Stale.tsx", "stale");
    write(&config.output_dir, "Removed.tsx", "stale");

    build_site(&config, &FsWriter).await.unwrap();

    assert_eq!(
        fs::read_to_string(config.output_dir.join("DocsLayout.tsx")).unwrap(),
        "layout"
    );
    assert!(!config.output_dir.join("old").exists());
    assert!(!config.output_dir.join("Removed.tsx").exists());
}

#[tokio::test]
async fn without_clean_previous_files_survive() {
    let tmp = docs_tree();
    let mut config = config_for(&tmp);
    config.clean = false;
    write(&config.output_dir, "Custom.tsx", "mine");

    build_site(&config, &FsWriter).await.unwrap();

    assert!(config.output_dir.join("Custom.tsx").exists());
}

#[tokio::test]
async fn missing_source_root_fails_the_build() {
    let tmp = tempdir().unwrap();
    write(&tmp.path().join("docs"), "guides/a.md", "# A\n");
    let config = config_for(&tmp);

    let err = build_site(&config, &FsWriter).await.unwrap_err();
    match err {
        SiteBuildError::Read { path, .. } => assert!(path.ends_with("packages")),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[tokio::test]
async fn colliding_outputs_are_rejected() {
    let tmp = tempdir().unwrap();
    let docs = tmp.path().join("docs");
    write(&docs, "guides/setup/a/db.md", "# One\n");
    write(&docs, "guides/setup/b/db.md", "# Two\n");
    fs::create_dir_all(docs.join("packages")).unwrap();
    let config = config_for(&tmp);

    let err = build_site(&config, &FsWriter).await.unwrap_err();
    assert!(matches!(err, SiteBuildError::DuplicateOutput(p) if p.ends_with("setup/Db.tsx")));
}

#[tokio::test]
async fn colliding_export_names_are_rejected() {
    let tmp = tempdir().unwrap();
    let docs = tmp.path().join("docs");
    write(&docs, "guides/setup-intro.md", "# Flat\n");
    write(&docs, "guides/setup/intro.md", "# Nested\n");
    fs::create_dir_all(docs.join("packages")).unwrap();
    let config = config_for(&tmp);

    let err = build_site(&config, &FsWriter).await.unwrap_err();
    assert!(matches!(err, SiteBuildError::DuplicateExport(ref name) if name == "SetupIntro"));
    assert!(!config.output_dir.join("index.ts").exists());
}

#[tokio::test]
async fn write_failure_stops_the_build() {
    let tmp = docs_tree();
    let config = config_for(&tmp);
    fs::create_dir_all(&config.output_dir).unwrap();

    let mut writer = MockDocWriter::new();
    writer.expect_ensure_dir().returning(|_| Ok(()));
    writer
        .expect_write_file()
        .times(1)
        .returning(|_, _| Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full")));

    let err = build_site(&config, &writer).await.unwrap_err();
    assert!(matches!(err, SiteBuildError::Write { .. }));
}
