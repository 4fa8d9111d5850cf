//! Integration tests for the `repo-clone` binary.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn clone_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("repo-clone");
    for key in ["PROGRAM_ID", "CENTRAL_REPO_DIR"] {
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

#[test]
fn test_help_flag() {
    clone_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--program-id").and(predicate::str::contains("SSO")));
}

#[test]
fn test_missing_env_file_aborts() {
    clone_cmd()
        .args(["--program-id", "42155", "--env-file", "/nonexistent/.env"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("env file"));
}

#[test]
fn test_missing_central_repo_dir_aborts() {
    let file = env_file("PROGRAM_ID=42155\n");

    clone_cmd()
        .arg("--env-file")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("CENTRAL_REPO_DIR"));
}

#[test]
fn test_program_id_required_from_flag_or_env() {
    let dir = tempfile::tempdir().unwrap();
    let file = env_file(&format!("CENTRAL_REPO_DIR={}\n", dir.path().display()));

    clone_cmd()
        .arg("--env-file")
        .arg(file.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("program-id"));
}
