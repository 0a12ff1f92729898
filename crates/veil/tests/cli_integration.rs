//! CLI integration tests for the Veil command-line interface.
//!
//! These cover help output, argument parsing and the commands that do not
//! start a long-running server.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the veil binary, isolated from the real user config.
fn veil(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("veil").unwrap();
    cmd.env("VEIL_CONFIG_DIR", config_dir.path())
        .current_dir(config_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("algorithms"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("veil"));
}

#[test]
fn test_start_help_shows_overrides() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--max-session-age"))
        .stdout(predicate::str::contains("--cleanup-interval"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_start_rejects_non_numeric_port() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .args(["start", "--port", "eighty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_algorithms_lists_names() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .arg("algorithms")
        .assert()
        .success()
        .stdout("aes128\naes192\naes256\ndes\n");
}

#[test]
fn test_algorithms_json() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .args(["algorithms", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"names":["aes128","aes192","aes256","des"]}"#,
        ));
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();

    veil(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(dir.path().join("config.toml").is_file());

    std::fs::write(dir.path().join("veil.toml"), "[server]\nport = 9443\n").unwrap();

    veil(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("port = 9443"))
        .stdout(predicate::str::contains("max_session_age_secs = 600"));
}

#[test]
fn test_start_rejects_zero_session_age() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .args(["start", "--max-session-age", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_session_age_secs"));
}

#[test]
fn test_start_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    veil(&dir)
        .args(["start", "--config", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}
