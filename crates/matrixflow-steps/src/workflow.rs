//! Whole-pipeline runner: generate, invert, reduce, plot, report.
use std::time::Instant;

use anyhow::Result;
use maud::{html, PreEscaped};
use serde::{Deserialize, Serialize};

use crate::config::WorkflowConfig;
use crate::manifest::{Manifest, DEFAULT_FILEPATH_COLUMN};
use crate::report::{plots, Report, ReportSection};
use crate::staging::StagingArea;
use crate::steps::plot::read_vectors;
use crate::steps::{build_step, MatrixSource, Step, StepKind, StepParams};

/// Report file written at the staging root after a full run.
pub const REPORT_FILE_NAME: &str = "report.html";

/// Workload used by `debug` runs.
const DEBUG_N: usize = 10;
const DEBUG_M: usize = 10;

/// Options for a full workflow run.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct WorkflowOptions {
    /// Run the mapped step variants on the rayon thread pool.
    pub parallel: bool,
    /// Wipe the staging root before running.
    pub clean: bool,
    /// Shrink the workload so a full run finishes quickly.
    pub debug: bool,
    /// Number of matrices to generate.
    pub n: usize,
    /// Generated matrices are `m` x `m`.
    pub m: usize,
    /// Base RNG seed.
    pub seed: u64,
    /// Write `report.html` at the staging root after the run.
    pub report: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            clean: false,
            debug: false,
            n: 100,
            m: 100,
            seed: 1,
            report: true,
        }
    }
}

/// What one step did during a run.
#[derive(Debug, Clone)]
pub struct StepSummary {
    pub step: String,
    pub items: usize,
    pub seconds: f64,
}

/// Per-step accounting for a full run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct WorkflowSummary {
    pub steps: Vec<StepSummary>,
}

/// Run the whole pipeline in the documented order.
///
/// Generation, inversion, and reduction use either the sequential or the
/// mapped steps depending on `options.parallel`; both plot steps then read
/// whichever reduce step ran. Returns per-step item counts and durations.
pub fn run_all(config: &WorkflowConfig, options: &WorkflowOptions) -> Result<WorkflowSummary> {
    let staging = StagingArea::from_config(config);
    if options.clean {
        staging.clean_all()?;
    }

    let (n, m) = if options.debug {
        (DEBUG_N, DEBUG_M)
    } else {
        (options.n, options.m)
    };

    log::info!(
        "Running the {} workflow against {}",
        if options.parallel { "parallel" } else { "sequential" },
        staging.root().display()
    );

    let params = StepParams {
        n,
        m,
        seed: options.seed,
        ..StepParams::default()
    };
    let kinds = if options.parallel {
        [StepKind::MappedRaw, StepKind::MappedInvert, StepKind::MappedSum]
    } else {
        [StepKind::Raw, StepKind::Invert, StepKind::Sum]
    };

    let mut summary = WorkflowSummary::default();
    for kind in kinds {
        let step = build_step(kind, params.clone());
        summary.steps.push(run_timed(step.as_ref(), &staging)?);
    }

    // Both plot steps read whichever reduce step just ran.
    let vectors_manifest = staging.manifest_path(reduce_step(options).name());
    let plot_params = StepParams {
        source: MatrixSource::Manifest(vectors_manifest),
        ..StepParams::default()
    };
    for kind in [StepKind::Plot, StepKind::FancyPlot] {
        let step = build_step(kind, plot_params.clone());
        summary.steps.push(run_timed(step.as_ref(), &staging)?);
    }

    if options.report {
        write_report(&staging, config, options, &summary)?;
    }

    Ok(summary)
}

fn reduce_step(options: &WorkflowOptions) -> StepKind {
    if options.parallel {
        StepKind::MappedSum
    } else {
        StepKind::Sum
    }
}

fn run_timed(step: &dyn Step, staging: &StagingArea) -> Result<StepSummary> {
    let start = Instant::now();
    let manifest = step.run(staging)?;
    let seconds = start.elapsed().as_secs_f64();
    log::info!(
        "Step '{}' produced {} items in {:.2}s",
        step.name(),
        manifest.len(),
        seconds
    );
    Ok(StepSummary {
        step: step.name().to_string(),
        items: manifest.len(),
        seconds,
    })
}

#[derive(Serialize)]
struct ReportedRun<'a> {
    config: &'a WorkflowConfig,
    options: &'a WorkflowOptions,
}

/// Write `report.html` at the staging root.
fn write_report(
    staging: &StagingArea,
    config: &WorkflowConfig,
    options: &WorkflowOptions,
    summary: &WorkflowSummary,
) -> Result<()> {
    let mut report = Report::new(
        "MatrixFlow",
        env!("CARGO_PKG_VERSION"),
        None,
        "MatrixFlow Workflow Report",
    );

    /* Section 1: Overview */
    {
        let mut overview_section = ReportSection::new("Overview");

        overview_section.add_content(html! {
            "This report summarizes a MatrixFlow run. Each step staged its outputs under its own directory and recorded them in a manifest; the charts below show the cumulative-sum vectors the run produced."
        });

        overview_section.add_content(html! {
            table class="report-table" {
                thead {
                    tr {
                        th { "Step" }
                        th { "Items" }
                        th { "Duration (s)" }
                    }
                }
                tbody {
                    @for step in &summary.steps {
                        tr {
                            td { (step.step) }
                            td { (step.items) }
                            td { (format!("{:.3}", step.seconds)) }
                        }
                    }
                }
            }
        });

        let manifest = Manifest::read(
            staging.manifest_path(reduce_step(options).name()),
            DEFAULT_FILEPATH_COLUMN,
        )?;
        let vectors = read_vectors(manifest.paths())?;
        overview_section.add_plot(plots::plot_vectors(&vectors));
        overview_section.add_plot(plots::plot_gradient_fill(&vectors));

        report.add_section(overview_section);
    }

    /* Section 2: Configuration */
    {
        let mut config_section = ReportSection::new("Configuration");
        let reported = ReportedRun { config, options };
        config_section.add_content(html! {
            style {
                ".code-container {
                    background-color: #f5f5f5;
                    padding: 10px;
                    border-radius: 5px;
                    overflow-x: auto;
                    font-family: monospace;
                    white-space: pre-wrap;
                }"
            }
            div class="code-container" {
                pre {
                    code { (PreEscaped(serde_json::to_string_pretty(&reported)?)) }
                }
            }
        });
        report.add_section(config_section);
    }

    let path = staging.root().join(REPORT_FILE_NAME);
    report.save_to_file(&path)?;
    log::info!("Saved report to {}", path.display());
    Ok(())
}
