//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `matrixflow` binary to verify that
//! argument parsing, help text, and error handling work end-to-end.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("matrixflow").unwrap()
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("invert"))
        .stdout(predicate::str::contains("fancyplot"))
        .stdout(predicate::str::contains("mapped-raw"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("matrixflow"));
}

#[test]
fn unknown_subcommand_errors() {
    cmd().arg("shuffle").assert().failure();
}

// ---------------------------------------------------------------------------
// Generation steps
// ---------------------------------------------------------------------------

#[test]
fn raw_stages_files_under_local_staging() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["raw", "-n", "2", "-m", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("staged 2 files"));

    let staging = dir.path().join("local_staging");
    assert!(staging.join("raw").join("manifest.csv").exists());
    assert!(staging.join("raw").join("matrices").join("matrix_1.csv").exists());
}

#[test]
fn zero_size_matrices_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["raw", "-n", "1", "-m", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

// ---------------------------------------------------------------------------
// Consuming steps
// ---------------------------------------------------------------------------

#[test]
fn invert_without_upstream_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("invert")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed"))
        .stderr(predicate::str::contains("run the 'raw' step first"));
}

#[test]
fn plot_accepts_an_explicit_vectors_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let vector = dir.path().join("vector_0.csv");
    std::fs::write(&vector, "1.0\n3.0\n6.0\n").unwrap();
    let manifest = dir.path().join("vectors.csv");
    std::fs::write(&manifest, format!("filepath\n{}\n", vector.display())).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["plot", "--vectors"])
        .arg(&manifest)
        .assert()
        .success()
        .stderr(predicate::str::contains("staged 1 files"));

    assert!(dir
        .path()
        .join("local_staging")
        .join("plot")
        .join("plots")
        .join("plot.html")
        .exists());
}

// ---------------------------------------------------------------------------
// Clean
// ---------------------------------------------------------------------------

#[test]
fn clean_on_missing_staging_succeeds() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("Cleaning staging root"));
}

#[test]
fn clean_step_removes_only_that_step() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("local_staging");
    std::fs::create_dir_all(staging.join("raw").join("matrices")).unwrap();
    std::fs::create_dir_all(staging.join("invert").join("inverted")).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["clean", "--step", "raw"])
        .assert()
        .success();

    assert!(!staging.join("raw").exists());
    assert!(staging.join("invert").exists());
}

#[test]
fn clean_rejects_unknown_step_names() {
    cmd()
        .args(["clean", "--step", "shuffle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
