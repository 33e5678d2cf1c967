//! Integration tests for the `unidash` binary.
//!
//! Argument parsing, help output, shell completions, config resolution and
//! usage errors, all without a live UniFi controller.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// `unidash` with `UNIDASH_*` variables cleared and config directories
/// pointed at a nonexistent path, so the host setup never leaks in.
fn unidash() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("unidash");
    cmd.env("HOME", "/tmp/unidash-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/unidash-test-nonexistent")
        .env_remove("UNIDASH_CONFIG")
        .env_remove("UNIDASH_CONTROLLER")
        .env_remove("UNIDASH_SITE")
        .env_remove("UNIDASH_INSECURE")
        .env_remove("UNIDASH_TIMEOUT")
        .env_remove("UNIDASH_OUTPUT")
        .env_remove("UNIDASH_SERVICE")
        .env_remove("UNIDASH_TOP");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    unidash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("top"))
        .stdout(predicate::str::contains("credentials"));
}

#[test]
fn version_flag_prints_version() {
    unidash()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_a_usage_error() {
    unidash().assert().code(2);
}

#[test]
fn completions_generate_for_bash() {
    unidash()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unidash"));
}

#[test]
fn config_path_points_at_toml_file() {
    unidash()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_show_reads_given_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "controller = \"https://unifi.test:8443\"\nsite = \"lab\"\n").unwrap();

    unidash()
        .args(["config", "show", "--output", "json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://unifi.test:8443"))
        .stdout(predicate::str::contains("\"site\": \"lab\""));
}

#[test]
fn config_show_applies_flag_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    unidash()
        .args(["config", "show", "--site", "branch", "--timeout", "3", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("site = \"branch\""))
        .stdout(predicate::str::contains("timeout = 3"));
}

#[test]
fn invalid_controller_url_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    unidash()
        .args(["--controller", "not a url", "devices", "--config"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("controller"));
}
