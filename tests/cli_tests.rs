//! Command-line output contract
//!
//! With `--json`, stdout must hold exactly one JSON document and nothing else.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CATALOG: &str = r#"
[[sports]]
id = 1
name = "Soccer"

[[leagues]]
id = 10
sport_id = 1
name = "Premier League"
source = "a"

[[leagues]]
id = 20
sport_id = 1
name = "EPL"
source = "b"

[[teams]]
id = 101
league_id = 10
name = "Team X"
source = "a"

[[teams]]
id = 55
league_id = 20
name = "Team Y"
source = "b"
"#;

/// Test helper: a scratch directory holding the catalog file
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("catalog.toml"), CATALOG).unwrap();
    dir
}

fn matchdesk(dir: &Path, args: &[&str]) -> Output {
    let database = dir.join("matchdesk.db");
    let config = dir.join("matchdesk.toml");
    Command::new(env!("CARGO_BIN_EXE_matchdesk"))
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--database")
        .arg(&database)
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .unwrap()
}

/// stdout must parse as a single JSON value
fn parse_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "exit code: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout is not JSON: {}\n{}", e, stdout))
}

#[test]
fn test_import_json_is_a_single_document() {
    let dir = workspace();

    let output = matchdesk(dir.path(), &["--json", "import", "--file", "catalog.toml"]);
    let body = parse_json(&output);
    assert_eq!(body["ok"], true);
    assert_eq!(body["command"], "import");
    assert_eq!(body["data"]["sports"], 1);
    assert_eq!(body["data"]["leagues"], 2);
    assert_eq!(body["data"]["teams"], 2);
}

#[test]
fn test_write_and_read_commands_emit_json() {
    let dir = workspace();
    parse_json(&matchdesk(dir.path(), &["--json", "import", "--file", "catalog.toml"]));

    let paired = parse_json(&matchdesk(
        dir.path(),
        &["--json", "pair-leagues", "--source-a", "10", "--source-b", "20"],
    ));
    assert_eq!(paired["data"]["created"], true);

    let rejected = parse_json(&matchdesk(
        dir.path(),
        &["--json", "match-teams", "--source-a", "-1", "--source-b", "55"],
    ));
    assert_eq!(rejected["data"]["created"], false);

    let pairs = parse_json(&matchdesk(dir.path(), &["--json", "pairs"]));
    assert_eq!(pairs["data"].as_array().unwrap().len(), 1);

    let unmatched = parse_json(&matchdesk(dir.path(), &["--json", "unmatched", "--pair", "10,20"]));
    assert_eq!(unmatched["data"]["source_a"][0]["id"], 101);
    assert_eq!(unmatched["data"]["source_b"][0]["id"], 55);

    let stats = parse_json(&matchdesk(dir.path(), &["--json", "stats"]));
    assert_eq!(stats["data"]["league_associations"], 1);
}

#[test]
fn test_malformed_pair_is_not_reported_as_reconciled() {
    let dir = workspace();
    parse_json(&matchdesk(dir.path(), &["--json", "import", "--file", "catalog.toml"]));

    let output = matchdesk(dir.path(), &["unmatched", "--pair", "10,abc"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains("Nothing left to match"), "stdout: {}", stdout);
    assert!(stderr.contains("no teams listed"), "stderr: {}", stderr);

    let body = parse_json(&matchdesk(dir.path(), &["--json", "unmatched", "--pair", "10,abc"]));
    assert!(body["data"]["source_a"].as_array().unwrap().is_empty());
    assert!(body["data"]["source_b"].as_array().unwrap().is_empty());
}
