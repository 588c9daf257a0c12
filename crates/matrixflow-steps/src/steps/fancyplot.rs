//! Plot staged vectors as gradient-filled curves.
use anyhow::Result;

use crate::manifest::Manifest;
use crate::report::plots;
use crate::staging::StagingArea;
use crate::steps::plot::read_vectors;
use crate::steps::{sum, Step, StepParams};

pub(crate) const STEP_NAME: &str = "fancyplot";
pub(crate) const PAYLOAD_DIR: &str = "fancyplots";
pub(crate) const PLOT_FILE_NAME: &str = "plot_fancy.html";

/// Draw the staged vectors as filled curves colored on the gnuplot palette,
/// saved as `plot_fancy.html`.
pub struct FancyPlotStep {
    params: StepParams,
}

impl FancyPlotStep {
    pub fn new(params: StepParams) -> Self {
        Self { params }
    }
}

impl Step for FancyPlotStep {
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
        log::info!("Drawing fancy plot for {} vectors", inputs.len());

        let vectors = read_vectors(&inputs)?;
        let plot = plots::plot_gradient_fill(&vectors);
        let path = payload_dir.join(PLOT_FILE_NAME);
        plot.write_html(&path);
        log::info!("Saved plot to {}", path.display());

        let manifest = Manifest::new(vec![path]);
        manifest.write(staging.manifest_path(STEP_NAME))?;
        Ok(manifest)
    }
}
