//! Reduce staged matrices to cumulative-sum vectors.
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::io::{read_matrix_csv, write_vector_csv};
use crate::manifest::{self, Manifest};
use crate::math;
use crate::staging::StagingArea;
use crate::steps::{invert, Step, StepParams};

pub(crate) const STEP_NAME: &str = "sum";
pub(crate) const PAYLOAD_DIR: &str = "vectors";

/// Reduce one matrix to its cumulative-sum vector, staged as `vector_{i}.csv`.
///
/// The item index is taken from the input filename when it carries one, so
/// vector names line up with the matrices they came from. `fallback_index`
/// covers inputs with non-conforming names.
pub(crate) fn sum_one(input: &Path, payload_dir: &Path, fallback_index: usize) -> Result<PathBuf> {
    let matrix = read_matrix_csv(input)?;
    let vector = math::max_sort_cumsum(&matrix);

    let index = manifest::index_from_filename(input).unwrap_or(fallback_index);
    let path = payload_dir.join(format!("vector_{}.csv", index));
    write_vector_csv(&path, &vector)?;
    Ok(path)
}

/// Reduce every matrix listed by the upstream manifest to a vector.
pub struct SumStep {
    params: StepParams,
}

impl SumStep {
    pub fn new(params: StepParams) -> Self {
        Self { params }
    }
}

impl Step for SumStep {
    fn name(&self) -> &str {
        STEP_NAME
    }

    fn upstream(&self) -> Option<&str> {
        Some(invert::STEP_NAME)
    }

    fn run(&self, staging: &StagingArea) -> Result<Manifest> {
        let inputs =
            self.params
                .source
                .resolve(staging, self.upstream(), &self.params.filepath_column)?;
        let payload_dir = staging.payload_dir(STEP_NAME, PAYLOAD_DIR)?;
        log::info!("Generating cumulative sums for {} matrices", inputs.len());

        let mut paths = Vec::with_capacity(inputs.len());
        for (position, input) in inputs.iter().enumerate() {
            let path = sum_one(input, &payload_dir, position)?;
            log::debug!("Saved vector to {}", path.display());
            paths.push(path);
        }

        let manifest = Manifest::new(paths);
        manifest.write(staging.manifest_path(STEP_NAME))?;
        Ok(manifest)
    }
}
