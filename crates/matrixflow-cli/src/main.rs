use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use matrixflow_cli::options::{
    config_from_matches, consume_params, generate_params, workflow_options,
};
use matrixflow_steps::config::CONFIG_FILE_NAME;
use matrixflow_steps::staging::StagingArea;
use matrixflow_steps::steps::{build_step, Step, StepKind};
use matrixflow_steps::workflow;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MATRIXFLOW_LOG", "error,matrixflow=info"))
        .init();

    let matches = Command::new("matrixflow")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("MatrixFlow CLI - staged example workflow over random matrices")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("all")
                .about("Run the full workflow: generate, invert, sum, plot, report")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .help("Run the data steps as parallel maps on the rayon thread pool")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("clean")
                        .long("clean")
                        .help("Wipe the staging root before running")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .help("Shrink the workload to 10 10x10 matrices for a fast run")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no_report")
                        .long("no-report")
                        .help("Disable HTML report generation.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("n")
                        .short('n')
                        .help("Number of matrices to generate")
                        .default_value("100")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("m")
                        .short('m')
                        .help("Generated matrices are m x m")
                        .default_value("100")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Base RNG seed; matrix i draws from seed + i")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("raw")
                .about("Generate random matrices and stage them")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("n")
                        .short('n')
                        .help("Number of matrices to generate")
                        .default_value("100")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("m")
                        .short('m')
                        .help("Generated matrices are m x m")
                        .default_value("100")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Base RNG seed; matrix i draws from seed + i")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("mapped-raw")
                .about("Generate random matrices under a parallel map")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("n")
                        .short('n')
                        .help("Number of matrices to generate")
                        .default_value("100")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("m")
                        .short('m')
                        .help("Generated matrices are m x m")
                        .default_value("100")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Base RNG seed; matrix i draws from seed + i")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("invert")
                .about("Invert the staged matrices")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("matrices")
                        .long("matrices")
                        .help("Manifest listing the matrices to invert. Defaults to the 'raw' step's manifest.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("filepath_column")
                        .long("filepath-column")
                        .help("Manifest column holding input file paths")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                ),
        )
        .subcommand(
            Command::new("mapped-invert")
                .about("Invert the staged matrices under a parallel map")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("matrices")
                        .long("matrices")
                        .help("Manifest listing the matrices to invert. Defaults to the 'mappedraw' step's manifest.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("filepath_column")
                        .long("filepath-column")
                        .help("Manifest column holding input file paths")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                ),
        )
        .subcommand(
            Command::new("sum")
                .about("Reduce the staged matrices to cumulative-sum vectors")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("matrices")
                        .long("matrices")
                        .help("Manifest listing the matrices to reduce. Defaults to the 'invert' step's manifest.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("filepath_column")
                        .long("filepath-column")
                        .help("Manifest column holding input file paths")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                ),
        )
        .subcommand(
            Command::new("mapped-sum")
                .about("Reduce the staged matrices to vectors under a parallel map")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("matrices")
                        .long("matrices")
                        .help("Manifest listing the matrices to reduce. Defaults to the 'mappedinvert' step's manifest.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("filepath_column")
                        .long("filepath-column")
                        .help("Manifest column holding input file paths")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                ),
        )
        .subcommand(
            Command::new("plot")
                .about("Plot the staged vectors as plain lines")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("vectors")
                        .long("vectors")
                        .help("Manifest listing the vectors to plot. Defaults to the 'sum' step's manifest.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("filepath_column")
                        .long("filepath-column")
                        .help("Manifest column holding input file paths")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                ),
        )
        .subcommand(
            Command::new("fancyplot")
                .about("Plot the staged vectors as gradient-filled curves")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("vectors")
                        .long("vectors")
                        .help("Manifest listing the vectors to plot. Defaults to the 'sum' step's manifest.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("filepath_column")
                        .long("filepath-column")
                        .help("Manifest column holding input file paths")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                ),
        )
        .subcommand(
            Command::new("clean")
                .about("Remove staged files")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to workflow configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("step")
                        .long("step")
                        .help("Clean a single step instead of the whole staging root")
                        .value_parser([
                            "raw",
                            "invert",
                            "sum",
                            "plot",
                            "fancyplot",
                            "mappedraw",
                            "mappedinvert",
                            "mappedsum",
                        ]),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("all", sub_m)) => handle_all(sub_m),
        Some(("raw", sub_m)) => handle_generate(sub_m, StepKind::Raw),
        Some(("mapped-raw", sub_m)) => handle_generate(sub_m, StepKind::MappedRaw),
        Some(("invert", sub_m)) => handle_consume(sub_m, StepKind::Invert, "matrices"),
        Some(("mapped-invert", sub_m)) => handle_consume(sub_m, StepKind::MappedInvert, "matrices"),
        Some(("sum", sub_m)) => handle_consume(sub_m, StepKind::Sum, "matrices"),
        Some(("mapped-sum", sub_m)) => handle_consume(sub_m, StepKind::MappedSum, "matrices"),
        Some(("plot", sub_m)) => handle_consume(sub_m, StepKind::Plot, "vectors"),
        Some(("fancyplot", sub_m)) => handle_consume(sub_m, StepKind::FancyPlot, "vectors"),
        Some(("clean", sub_m)) => handle_clean(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_all(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;
    if matches.get_one::<PathBuf>("config").is_none() && !Path::new(CONFIG_FILE_NAME).exists() {
        let default_json = serde_json::to_string_pretty(&config).unwrap_or_default();
        eprintln!("[MatrixFlow] No config provided; using defaults:\n{}", default_json);
    }

    let options = workflow_options(matches);
    match workflow::run_all(&config, &options) {
        Ok(summary) => {
            eprintln!("[MatrixFlow] Completed {} steps.", summary.steps.len());
            Ok(())
        }
        Err(e) => {
            log::error!("Workflow failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_generate(matches: &ArgMatches, kind: StepKind) -> Result<()> {
    let config = config_from_matches(matches)?;
    let staging = StagingArea::from_config(&config);
    let step = build_step(kind, generate_params(matches));
    run_step(step.as_ref(), &staging)
}

fn handle_consume(matches: &ArgMatches, kind: StepKind, manifest_arg: &str) -> Result<()> {
    let config = config_from_matches(matches)?;
    let staging = StagingArea::from_config(&config);
    let step = build_step(kind, consume_params(matches, manifest_arg));
    run_step(step.as_ref(), &staging)
}

fn run_step(step: &dyn Step, staging: &StagingArea) -> Result<()> {
    eprintln!("[MatrixFlow] Running step '{}'", step.name());
    match step.run(staging) {
        Ok(manifest) => {
            eprintln!(
                "[MatrixFlow] Step '{}' staged {} files.",
                step.name(),
                manifest.len()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Step '{}' failed: {:#}", step.name(), e);
            std::process::exit(1)
        }
    }
}

fn handle_clean(matches: &ArgMatches) -> Result<()> {
    let config = config_from_matches(matches)?;
    let staging = StagingArea::from_config(&config);
    match matches.get_one::<String>("step") {
        Some(step) => {
            eprintln!("[MatrixFlow] Cleaning step '{}'", step);
            staging.clean_step(step)?;
        }
        None => {
            eprintln!(
                "[MatrixFlow] Cleaning staging root {}",
                staging.root().display()
            );
            staging.clean_all()?;
        }
    }
    Ok(())
}
