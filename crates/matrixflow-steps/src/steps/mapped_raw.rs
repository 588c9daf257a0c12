//! Generate random matrices under a parallel map.
use anyhow::{bail, Result};
use rayon::prelude::*;

use crate::io::write_matrix_csv;
use crate::manifest::Manifest;
use crate::staging::StagingArea;
use crate::steps::raw::generate_matrix;
use crate::steps::{Step, StepParams};

pub(crate) const STEP_NAME: &str = "mappedraw";
pub(crate) const PAYLOAD_DIR: &str = "matrices";

/// As `raw`, but each item runs on the rayon thread pool.
///
/// Per-item seeding keeps the output byte-identical to the sequential step,
/// and results are ordered by item index before the manifest is written.
pub struct MappedRawStep {
    params: StepParams,
}

impl MappedRawStep {
    pub fn new(params: StepParams) -> Self {
        Self { params }
    }
}

impl Step for MappedRawStep {
    fn name(&self) -> &str {
        STEP_NAME
    }

    fn run(&self, staging: &StagingArea) -> Result<Manifest> {
        let n = self.params.n;
        let m = self.params.m;
        let seed = self.params.seed;
        if m == 0 {
            bail!("Matrix size must be positive, got m = 0");
        }

        let payload_dir = staging.payload_dir(STEP_NAME, PAYLOAD_DIR)?;
        log::info!("Creating and saving {} {}x{} matrices in parallel", n, m, m);

        let mut items = (0..n)
            .into_par_iter()
            .map(|index| {
                let matrix = generate_matrix(m, seed, index);
                let path = payload_dir.join(format!("matrix_{}.csv", index));
                write_matrix_csv(&path, &matrix)?;
                Ok((index, path))
            })
            .collect::<Result<Vec<_>>>()?;
        items.sort_by_key(|(index, _)| *index);

        let manifest = Manifest::new(items.into_iter().map(|(_, path)| path).collect());
        manifest.write(staging.manifest_path(STEP_NAME))?;
        Ok(manifest)
    }
}
