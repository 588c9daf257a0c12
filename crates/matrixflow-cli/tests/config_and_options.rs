//! Integration tests for workflow config loading and option types.

use std::path::PathBuf;

use matrixflow_steps::config::{load_config, WorkflowConfig};
use matrixflow_steps::steps::StepKind;
use matrixflow_steps::workflow::WorkflowOptions;

// ---------------------------------------------------------------------------
// WorkflowConfig
// ---------------------------------------------------------------------------

#[test]
fn config_default_values() {
    let cfg = WorkflowConfig::default();
    assert_eq!(cfg.project_local_staging_dir, PathBuf::from("local_staging"));
}

#[test]
fn config_parses_the_staging_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workflow_config.json");
    std::fs::write(&path, r#"{"project_local_staging_dir": "/data/staging"}"#).unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.project_local_staging_dir, PathBuf::from("/data/staging"));
}

#[test]
fn config_missing_keys_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workflow_config.json");
    std::fs::write(&path, "{}").unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.project_local_staging_dir, PathBuf::from("local_staging"));
}

#[test]
fn config_tolerates_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workflow_config.json");
    std::fs::write(
        &path,
        r#"{"project_local_staging_dir": "staging", "quilt_package_owner": "aics"}"#,
    )
    .unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.project_local_staging_dir, PathBuf::from("staging"));
}

#[test]
fn config_malformed_json_errors_with_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workflow_config.json");
    std::fs::write(&path, "not json").unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("workflow_config.json"));
}

#[test]
fn config_nonexistent_file_errors() {
    assert!(load_config("/nonexistent/workflow_config.json").is_err());
}

#[test]
fn config_serializes_to_json() {
    let cfg = WorkflowConfig::default();
    let json = serde_json::to_string_pretty(&cfg).unwrap();
    assert!(json.contains("project_local_staging_dir"));
}

// ---------------------------------------------------------------------------
// WorkflowOptions
// ---------------------------------------------------------------------------

#[test]
fn options_default_values() {
    let options = WorkflowOptions::default();
    assert!(!options.parallel);
    assert!(!options.clean);
    assert!(!options.debug);
    assert_eq!(options.n, 100);
    assert_eq!(options.m, 100);
    assert_eq!(options.seed, 1);
    assert!(options.report);
}

#[test]
fn options_round_trip_json() {
    let options = WorkflowOptions {
        parallel: true,
        n: 7,
        ..WorkflowOptions::default()
    };
    let json = serde_json::to_string(&options).unwrap();
    let parsed: WorkflowOptions = serde_json::from_str(&json).unwrap();
    assert!(parsed.parallel);
    assert_eq!(parsed.n, 7);
    assert_eq!(parsed.m, 100);
}

// ---------------------------------------------------------------------------
// StepKind
// ---------------------------------------------------------------------------

#[test]
fn step_kind_parses_cli_spellings() {
    assert_eq!("invert".parse::<StepKind>().unwrap(), StepKind::Invert);
    assert_eq!(
        "mapped-invert".parse::<StepKind>().unwrap(),
        StepKind::MappedInvert
    );
    assert_eq!(
        "mappedinvert".parse::<StepKind>().unwrap(),
        StepKind::MappedInvert
    );
    assert!("mapped".parse::<StepKind>().is_err());
}
