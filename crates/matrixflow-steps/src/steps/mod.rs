//! Workflow steps.
//!
//! Each step is a small unit that reads its inputs, writes payload files
//! under its own staging directory, and records what it produced in a
//! manifest. Steps are wired together by name: a consumer declares which
//! step's manifest it reads by default, and `MatrixSource` lets callers
//! override that with an explicit manifest or file list.
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};

use crate::manifest::{Manifest, DEFAULT_FILEPATH_COLUMN};
use crate::staging::StagingArea;

pub mod fancyplot;
pub mod invert;
pub mod mapped_invert;
pub mod mapped_raw;
pub mod mapped_sum;
pub mod plot;
pub mod raw;
pub mod sum;

pub use fancyplot::FancyPlotStep;
pub use invert::InvertStep;
pub use mapped_invert::MappedInvertStep;
pub use mapped_raw::MappedRawStep;
pub use mapped_sum::MappedSumStep;
pub use plot::PlotStep;
pub use raw::RawStep;
pub use sum::SumStep;

/// A runnable workflow step.
pub trait Step {
    /// Step name, which is also its directory under the staging root.
    fn name(&self) -> &str;

    /// Name of the step whose manifest feeds this one, if any.
    fn upstream(&self) -> Option<&str> {
        None
    }

    /// Run the step against the staging area and return its manifest.
    ///
    /// The manifest is also written to `<staging>/<name>/manifest.csv` so
    /// downstream steps can find the outputs in a later invocation.
    fn run(&self, staging: &StagingArea) -> Result<Manifest>;
}

/// Where a consuming step finds its input files.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MatrixSource {
    /// Read the manifest of the step's default upstream step.
    #[default]
    Upstream,
    /// Read an explicit manifest CSV.
    Manifest(PathBuf),
    /// Use these files directly, in order.
    Files(Vec<PathBuf>),
}

impl MatrixSource {
    pub(crate) fn resolve(
        &self,
        staging: &StagingArea,
        upstream: Option<&str>,
        filepath_column: &str,
    ) -> Result<Vec<PathBuf>> {
        match self {
            MatrixSource::Files(paths) => Ok(paths.clone()),
            MatrixSource::Manifest(path) => {
                Ok(Manifest::read(path, filepath_column)?.into_paths())
            }
            MatrixSource::Upstream => {
                let step = upstream
                    .ok_or_else(|| anyhow!("This step takes no upstream input"))?;
                let manifest_path = staging.manifest_path(step);
                if !manifest_path.exists() {
                    bail!(
                        "Upstream manifest not found: {} (run the '{}' step first)",
                        manifest_path.display(),
                        step
                    );
                }
                Ok(Manifest::read(&manifest_path, filepath_column)?.into_paths())
            }
        }
    }
}

/// Parameters shared by all steps.
///
/// Generation steps use `n`, `m`, and `seed`; consuming steps use `source`
/// and `filepath_column`. Defaults match the documented workflow defaults.
#[derive(Debug, Clone)]
pub struct StepParams {
    /// Number of matrices to generate.
    pub n: usize,
    /// Generated matrices are `m` x `m`.
    pub m: usize,
    /// Base RNG seed; item `i` draws from a generator seeded with `seed + i`.
    pub seed: u64,
    /// Input selection for consuming steps.
    pub source: MatrixSource,
    /// Manifest column holding input file paths.
    pub filepath_column: String,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            n: 100,
            m: 100,
            seed: 1,
            source: MatrixSource::Upstream,
            filepath_column: DEFAULT_FILEPATH_COLUMN.to_string(),
        }
    }
}

/// The supported step kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Raw,
    Invert,
    Sum,
    Plot,
    FancyPlot,
    MappedRaw,
    MappedInvert,
    MappedSum,
}

impl StepKind {
    /// The step's name and staging directory.
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::Raw => raw::STEP_NAME,
            StepKind::Invert => invert::STEP_NAME,
            StepKind::Sum => sum::STEP_NAME,
            StepKind::Plot => plot::STEP_NAME,
            StepKind::FancyPlot => fancyplot::STEP_NAME,
            StepKind::MappedRaw => mapped_raw::STEP_NAME,
            StepKind::MappedInvert => mapped_invert::STEP_NAME,
            StepKind::MappedSum => mapped_sum::STEP_NAME,
        }
    }
}

impl FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(StepKind::Raw),
            "invert" => Ok(StepKind::Invert),
            "sum" => Ok(StepKind::Sum),
            "plot" => Ok(StepKind::Plot),
            "fancyplot" => Ok(StepKind::FancyPlot),
            "mappedraw" | "mapped-raw" => Ok(StepKind::MappedRaw),
            "mappedinvert" | "mapped-invert" => Ok(StepKind::MappedInvert),
            "mappedsum" | "mapped-sum" => Ok(StepKind::MappedSum),
            other => Err(format!("Unknown step '{}'", other)),
        }
    }
}

/// Build a boxed step from a `StepKind` and its parameters.
/// Currently this is a thin factory implemented as a single function.
pub fn build_step(kind: StepKind, params: StepParams) -> Box<dyn Step> {
    match kind {
        StepKind::Raw => Box::new(RawStep::new(params)),
        StepKind::Invert => Box::new(InvertStep::new(params)),
        StepKind::Sum => Box::new(SumStep::new(params)),
        StepKind::Plot => Box::new(PlotStep::new(params)),
        StepKind::FancyPlot => Box::new(FancyPlotStep::new(params)),
        StepKind::MappedRaw => Box::new(MappedRawStep::new(params)),
        StepKind::MappedInvert => Box::new(MappedInvertStep::new(params)),
        StepKind::MappedSum => Box::new(MappedSumStep::new(params)),
    }
}
