//! Integration tests for the `a11y-autofix` binary.
//!
//! These validate argument parsing and the fail-fast configuration
//! path, everything that must happen before any network call.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Env vars the config loader recognizes; cleared for test isolation.
const CONFIG_KEYS: &[&str] = &[
    "SPACECAT_API_BASE",
    "SPACECAT_API_KEY",
    "SPACECAT_IMS_ORG_ID",
    "AWS_REGION",
    "SPACECAT_AWS_ACCESS_KEY_ID",
    "SPACECAT_AWS_SECRET_ACCESS_KEY",
    "SPACECAT_AWS_SESSION_TOKEN",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "S3_BUCKET_NAME",
    "SQS_SPACECAT_TO_MYSTIQUE_QUEUE_URL",
    "REPO_PATH",
    "PROGRAM_ID",
    "CENTRAL_REPO_DIR",
];

fn autofix_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("a11y-autofix");
    for key in CONFIG_KEYS {
        cmd.env_remove(key);
    }
    cmd
}

fn env_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ── Argument parsing ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    autofix_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--name")
            .and(predicate::str::contains("--site-id"))
            .and(predicate::str::contains("--send-all-issues")),
    );
}

#[test]
fn test_version_flag() {
    autofix_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("a11y-autofix"));
}

#[test]
fn test_requires_name_or_site_id() {
    autofix_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_name_and_site_id_are_mutually_exclusive() {
    autofix_cmd()
        .args([
            "--name",
            "sunstargum",
            "--site-id",
            "d2960efd-a226-4b15-b5ec-b64ccb99995e",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_suggestion_id_requires_opportunity_id() {
    autofix_cmd()
        .args([
            "--site-id",
            "d2960efd-a226-4b15-b5ec-b64ccb99995e",
            "--suggestion-id",
            "11111111-2222-3333-4444-555555555555",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--opportunity-id"));
}

#[test]
fn test_invalid_uuid_rejected() {
    autofix_cmd()
        .args(["--site-id", "not-a-uuid"])
        .assert()
        .failure()
        .code(2);
}

// ── Configuration fail-fast ─────────────────────────────────────────

#[test]
fn test_missing_env_file_aborts() {
    autofix_cmd()
        .args(["--name", "sunstargum", "--env-file", "/nonexistent/.env"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("env file"));
}

#[test]
fn test_missing_queue_url_aborts_before_any_network_call() {
    // Everything present except the queue URL; the API base points at a
    // closed port so an (incorrect) network attempt would fail loudly
    // with a different error.
    let file = env_file(
        "\
SPACECAT_API_BASE=http://127.0.0.1:1/api/ci
SPACECAT_API_KEY=k
SPACECAT_IMS_ORG_ID=o
SPACECAT_AWS_ACCESS_KEY_ID=AKIATEST
SPACECAT_AWS_SECRET_ACCESS_KEY=s
REPO_PATH=/tmp/repo
",
    );

    autofix_cmd()
        .args(["--name", "sunstargum"])
        .arg("--env-file")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("SQS_SPACECAT_TO_MYSTIQUE_QUEUE_URL"));
}

#[test]
fn test_missing_keys_reported_together() {
    let file = env_file("SPACECAT_API_KEY=k\n");

    autofix_cmd()
        .args(["--name", "sunstargum"])
        .arg("--env-file")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("SPACECAT_IMS_ORG_ID")
                .and(predicate::str::contains("REPO_PATH"))
                .and(predicate::str::contains("SQS_SPACECAT_TO_MYSTIQUE_QUEUE_URL")),
        );
}
