//! Plot staged vectors as plain line traces.
use std::path::PathBuf;

use anyhow::Result;
use ndarray::Array1;

use crate::io::read_vector_csv;
use crate::manifest::Manifest;
use crate::report::plots;
use crate::staging::StagingArea;
use crate::steps::{sum, Step, StepParams};

pub(crate) const STEP_NAME: &str = "plot";
pub(crate) const PAYLOAD_DIR: &str = "plots";
pub(crate) const PLOT_FILE_NAME: &str = "plot.html";

pub(crate) fn read_vectors(paths: &[PathBuf]) -> Result<Vec<Array1<f64>>> {
    paths.iter().map(read_vector_csv).collect()
}

/// Draw every staged vector as a line in one chart, saved as `plot.html`.
pub struct PlotStep {
    params: StepParams,
}

impl PlotStep {
    pub fn new(params: StepParams) -> Self {
        Self { params }
    }
}

impl Step for PlotStep {
    fn name(&self) -> &str {
        STEP_NAME
    }

    fn upstream(&self) -> Option<&str> {
        Some(sum::STEP_NAME)
    }

    fn run(&self, staging: &StagingArea) -> Result<Manifest> {
        let inputs =
            self.params
                .source
                .resolve(staging, self.upstream(), &self.params.filepath_column)?;
        let payload_dir = staging.payload_dir(STEP_NAME, PAYLOAD_DIR)?;
        log::info!("Plotting {} vectors", inputs.len());

        let vectors = read_vectors(&inputs)?;
        let plot = plots::plot_vectors(&vectors);
        let path = payload_dir.join(PLOT_FILE_NAME);
        plot.write_html(&path);
        log::info!("Saved plot to {}", path.display());

        let manifest = Manifest::new(vec![path]);
        manifest.write(staging.manifest_path(STEP_NAME))?;
        Ok(manifest)
    }
}
