//! Invert staged matrices.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::io::{read_matrix_csv, write_matrix_csv};
use crate::manifest::Manifest;
use crate::math;
use crate::staging::StagingArea;
use crate::steps::{raw, Step, StepParams};

pub(crate) const STEP_NAME: &str = "invert";
pub(crate) const PAYLOAD_DIR: &str = "inverted";

/// Invert one staged matrix, keeping its filename.
///
/// A singular input surfaces as an error naming the offending file; nothing
/// is written for it.
pub(crate) fn invert_one(input: &Path, payload_dir: &Path) -> Result<PathBuf> {
    let matrix = read_matrix_csv(input)?;
    let inverse = math::invert(&matrix)
        .with_context(|| format!("Failed to invert {}", input.display()))?;

    let file_name = input
        .file_name()
        .ok_or_else(|| anyhow!("Input path has no file name: {}", input.display()))?;
    let path = payload_dir.join(file_name);
    write_matrix_csv(&path, &inverse)?;
    Ok(path)
}

/// Invert every matrix listed by the upstream manifest.
pub struct InvertStep {
    params: StepParams,
}

impl InvertStep {
    pub fn new(params: StepParams) -> Self {
        Self { params }
    }
}

impl Step for InvertStep {
    fn name(&self) -> &str {
        STEP_NAME
    }

    fn upstream(&self) -> Option<&str> {
        Some(raw::STEP_NAME)
    }

    fn run(&self, staging: &StagingArea) -> Result<Manifest> {
        let inputs =
            self.params
                .source
                .resolve(staging, self.upstream(), &self.params.filepath_column)?;
        let payload_dir = staging.payload_dir(STEP_NAME, PAYLOAD_DIR)?;
        log::info!("Inverting {} matrices", inputs.len());

        let mut paths = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let path = invert_one(input, &payload_dir)?;
            log::debug!("Saved inverse to {}", path.display());
            paths.push(path);
        }

        let manifest = Manifest::new(paths);
        manifest.write(staging.manifest_path(STEP_NAME))?;
        Ok(manifest)
    }
}
