use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn site_command_builds_pages_and_index() {
    let tmp = tempdir().unwrap();
    let docs = tmp.path().join("docs");
    let out = tmp.path().join("out");
    write(&docs, "guides/setup/index.md", "# Setup\n\nConfigure.\n");
    write(&docs, "packages/router.md", "# Router\n\nRoutes.\n");

    let mut cmd = Command::cargo_bin("docs-sync").expect("Binary exists");
    cmd.arg("site")
        .arg("--docs-dir")
        .arg(&docs)
        .arg("--output")
        .arg(&out)
        .env_remove("DOCS_SITE_OUTPUT");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Site docs build complete (2 files"));

    assert!(out.join("setup/index.tsx").is_file());
    assert!(out.join("packages/Router.tsx").is_file());
    let index = fs::read_to_string(out.join("index.ts")).unwrap();
    assert!(index.contains(r#"export { default as Setup } from "./setup/index.js";"#));
}

#[test]
fn site_command_fails_without_source_roots() {
    let tmp = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("docs-sync").expect("Binary exists");
    cmd.arg("site")
        .arg("--docs-dir")
        .arg(tmp.path().join("missing"))
        .arg("--output")
        .arg(tmp.path().join("out"))
        .env_remove("DOCS_SITE_OUTPUT");

    cmd.assert().failure();
}

#[test]
fn packages_command_rejects_unknown_group() {
    let tmp = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("docs-sync").expect("Binary exists");
    cmd.arg("packages")
        .arg("--repo-root")
        .arg(tmp.path())
        .arg("--only")
        .arg("does-not-exist");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sync target group"));
    assert!(!tmp.path().join("packages").exists());
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{:?}", event));
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use docs_sync::cli::{run, Cli, Commands};

    let cli = Cli {
        command: Commands::Site {
            config: Some(std::path::PathBuf::from("dummy.yaml")),
            docs_dir: None,
            output: None,
            no_clean: false,
        },
    };

    let result = run(cli).await;
    assert!(result.is_err(), "missing config file should fail");

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
