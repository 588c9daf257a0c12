//! Conversion of parsed CLI arguments into library-level options.
use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use matrixflow_steps::config::{load_config, load_default_config, WorkflowConfig};
use matrixflow_steps::steps::{MatrixSource, StepParams};
use matrixflow_steps::workflow::WorkflowOptions;

/// Load the config named by `--config`, falling back to
/// `workflow_config.json` in the working directory, then to defaults.
pub fn config_from_matches(matches: &ArgMatches) -> Result<WorkflowConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => load_config(path),
        None => load_default_config(),
    }
}

/// Step parameters for the generation steps (`raw`, `mapped-raw`).
pub fn generate_params(matches: &ArgMatches) -> StepParams {
    StepParams {
        n: *matches.get_one::<usize>("n").unwrap(),
        m: *matches.get_one::<usize>("m").unwrap(),
        seed: *matches.get_one::<u64>("seed").unwrap(),
        ..StepParams::default()
    }
}

/// Step parameters for the consuming steps.
///
/// `manifest_arg` names the argument holding an explicit manifest path
/// (`matrices` or `vectors` depending on the subcommand); without it the
/// step reads its default upstream manifest.
pub fn consume_params(matches: &ArgMatches, manifest_arg: &str) -> StepParams {
    let source = match matches.get_one::<PathBuf>(manifest_arg) {
        Some(path) => MatrixSource::Manifest(path.clone()),
        None => MatrixSource::Upstream,
    };
    let mut params = StepParams {
        source,
        ..StepParams::default()
    };
    if let Some(column) = matches.get_one::<String>("filepath_column") {
        params.filepath_column = column.clone();
    }
    params
}

/// Full-run options for the `all` subcommand.
pub fn workflow_options(matches: &ArgMatches) -> WorkflowOptions {
    WorkflowOptions {
        parallel: matches.get_flag("parallel"),
        clean: matches.get_flag("clean"),
        debug: matches.get_flag("debug"),
        n: *matches.get_one::<usize>("n").unwrap(),
        m: *matches.get_one::<usize>("m").unwrap(),
        seed: *matches.get_one::<u64>("seed").unwrap(),
        report: !matches.get_flag("no_report"),
    }
}
