//! End-to-end runs of the full workflow through the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("matrixflow").unwrap()
}

#[test]
fn all_debug_stages_every_step_and_writes_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("staging");
    let config_path = dir.path().join("workflow_config.json");
    std::fs::write(
        &config_path,
        format!(
            "{{\"project_local_staging_dir\": \"{}\"}}",
            staging.display()
        ),
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["all", "--debug", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Completed 5 steps."));

    for step in ["raw", "invert", "sum", "plot", "fancyplot"] {
        assert!(
            staging.join(step).join("manifest.csv").exists(),
            "missing manifest for {}",
            step
        );
    }

    // Debug runs shrink the workload to 10 matrices.
    assert!(staging.join("raw").join("matrices").join("matrix_9.csv").exists());
    assert!(!staging.join("raw").join("matrices").join("matrix_10.csv").exists());
    assert!(staging.join("sum").join("vectors").join("vector_0.csv").exists());
    assert!(staging.join("plot").join("plots").join("plot.html").exists());
    assert!(staging
        .join("fancyplot")
        .join("fancyplots")
        .join("plot_fancy.html")
        .exists());

    let report = std::fs::read_to_string(staging.join("report.html")).unwrap();
    assert!(report.contains("Overview"));
    assert!(report.contains("Configuration"));
    assert!(report.contains("project_local_staging_dir"));
}

#[test]
fn all_parallel_debug_uses_the_mapped_steps() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("staging");
    let config_path = dir.path().join("workflow_config.json");
    std::fs::write(
        &config_path,
        format!(
            "{{\"project_local_staging_dir\": \"{}\"}}",
            staging.display()
        ),
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["all", "--debug", "--parallel", "--no-report", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    for step in ["mappedraw", "mappedinvert", "mappedsum", "plot", "fancyplot"] {
        assert!(
            staging.join(step).join("manifest.csv").exists(),
            "missing manifest for {}",
            step
        );
    }
    assert!(!staging.join("raw").exists());
    assert!(!staging.join("report.html").exists());
}

#[test]
fn default_config_runs_against_local_staging() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["all", "--debug", "--no-report"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No config provided"));

    let staging = dir.path().join("local_staging");
    assert!(staging.join("sum").join("manifest.csv").exists());
}

#[test]
fn clean_flag_discards_earlier_staging_state() {
    let dir = tempfile::tempdir().unwrap();
    let stale = dir
        .path()
        .join("local_staging")
        .join("raw")
        .join("matrices")
        .join("stale.csv");
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, "1.0\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["all", "--debug", "--clean", "--no-report"])
        .assert()
        .success();

    assert!(!stale.exists());
    assert!(dir
        .path()
        .join("local_staging")
        .join("raw")
        .join("manifest.csv")
        .exists());
}
