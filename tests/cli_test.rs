//! Integration tests for CLI argument parsing and read-only commands.
//!
//! `run` itself mutates the host, so only its dry-run preview is exercised
//! here; pipeline behavior is covered by the scripted-executor tests.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("provisioning"));
}

#[test]
fn cli_shows_version() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_rejects_unknown_subcommand() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.arg("frobnicate");
    cmd.assert().failure();
}

#[test]
fn cli_list_shows_plan() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("miniconda"))
        .stdout(predicate::str::contains("env:J"));
}

#[test]
fn cli_list_json_is_parseable() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.args(["list", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed["steps"].is_array());
    assert_eq!(parsed["environment"]["name"], "J");
    assert_eq!(parsed["environment"]["python_version"], "3.9");
}

#[test]
fn cli_status_reports_tools() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.arg("status");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("git"))
        .stdout(predicate::str::contains("env:J"));
}

#[test]
fn cli_status_json_is_parseable() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.args(["status", "--json"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed["tools"].is_array());
    assert!(parsed["environment"]["present"].is_boolean());
}

#[test]
fn cli_run_dry_run_previews_without_installing() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.args(["run", "--dry-run"]);
    // Exit code depends on whether this host's platform is supported, so
    // only the preview banner is asserted.
    cmd.assert()
        .stdout(predicate::str::contains("dry-run"));
}

#[test]
fn cli_completions_bash() {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rigup"));
}
