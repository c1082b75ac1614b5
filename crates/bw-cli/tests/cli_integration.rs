//! CLI integration tests
//!
//! Tests the banwatch CLI against a temporary registry using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn banwatch() -> Command {
    Command::cargo_bin("banwatch")
        .expect("Failed to locate banwatch binary - ensure it's built before running tests")
}

fn registry_names(path: &Path) -> Vec<String> {
    let contents = std::fs::read_to_string(path).expect("registry file should exist");
    let servers: Vec<serde_json::Value> =
        serde_json::from_str(&contents).expect("registry should be valid JSON");
    servers
        .iter()
        .map(|s| s["name"].as_str().expect("name field").to_string())
        .collect()
}

#[test]
fn test_cli_help() {
    banwatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("banwatch"))
        .stdout(predicate::str::contains("fail2ban log monitor"));
}

#[test]
fn test_cli_version() {
    banwatch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("banwatch"));
}

#[test]
fn test_cli_unknown_command() {
    banwatch()
        .arg("nonexistent-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_list_with_missing_registry() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("servers.json");

    banwatch()
        .args(["--config", registry.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No servers configured"));
}

#[test]
fn test_add_then_list_shows_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("servers.json");

    banwatch()
        .args([
            "--config",
            registry.to_str().unwrap(),
            "add",
            "--name",
            "web1",
            "--host",
            "10.0.0.1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added web1 (10.0.0.1)"));

    banwatch()
        .args(["--config", registry.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web1"))
        .stdout(predicate::str::contains("10.0.0.1"))
        .stdout(predicate::str::contains("adam"))
        .stdout(predicate::str::contains("/var/log/fail2ban.log"));
}

#[test]
fn test_add_rejects_duplicate_name() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("servers.json");
    let config = registry.to_str().unwrap();

    banwatch()
        .args(["--config", config, "add", "--name", "web1", "--host", "a"])
        .assert()
        .success();

    banwatch()
        .args(["--config", config, "add", "--name", "web1", "--host", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate server name"));
}

#[test]
fn test_remove_preserves_order_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("servers.json");
    let config = registry.to_str().unwrap();

    for name in ["a", "b", "c"] {
        banwatch()
            .args(["--config", config, "add", "--name", name, "--host", "h"])
            .assert()
            .success();
    }

    banwatch()
        .args(["--config", config, "remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed b (h)"));

    assert_eq!(registry_names(&registry), ["a", "c"]);
}

#[test]
fn test_remove_out_of_range_fails() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("servers.json");

    banwatch()
        .args(["--config", registry.to_str().unwrap(), "remove", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No server at index 5"));
}

#[test]
fn test_edit_updates_fields() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("servers.json");
    let config = registry.to_str().unwrap();

    banwatch()
        .args(["--config", config, "add", "--name", "web1", "--host", "old"])
        .assert()
        .success();

    banwatch()
        .args(["--config", config, "edit", "0", "--host", "10.0.0.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated web1 (10.0.0.9)"))
        .stderr(predicate::str::contains("restart to apply"));

    banwatch()
        .args(["--config", config, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10.0.0.9"));
}

#[test]
fn test_path_prints_registry_location() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("servers.json");

    banwatch()
        .args(["--config", registry.to_str().unwrap(), "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("servers.json"));
}

#[test]
fn test_watch_with_empty_registry_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("servers.json");

    banwatch()
        .args(["--config", registry.to_str().unwrap(), "watch"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No servers configured"));
}
