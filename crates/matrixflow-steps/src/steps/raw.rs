//! Generate a batch of random square matrices.
use anyhow::{bail, Result};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::io::write_matrix_csv;
use crate::manifest::Manifest;
use crate::staging::StagingArea;
use crate::steps::{Step, StepParams};

pub(crate) const STEP_NAME: &str = "raw";
pub(crate) const PAYLOAD_DIR: &str = "matrices";

/// Draw an `m` x `m` matrix of uniform values in `[0, 1)`.
///
/// Item `index` draws from its own generator seeded with `seed + index`, so
/// a batch produces the same matrices whether items run one at a time or
/// under a parallel map.
pub(crate) fn generate_matrix(m: usize, seed: u64, index: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
    Array2::from_shape_fn((m, m), |_| rng.gen::<f64>())
}

/// Generate `n` random matrices and stage them as `matrix_{i}.csv`.
pub struct RawStep {
    params: StepParams,
}

impl RawStep {
    pub fn new(params: StepParams) -> Self {
        Self { params }
    }
}

impl Step for RawStep {
    fn name(&self) -> &str {
        STEP_NAME
    }

    fn run(&self, staging: &StagingArea) -> Result<Manifest> {
        let n = self.params.n;
        let m = self.params.m;
        if m == 0 {
            bail!("Matrix size must be positive, got m = 0");
        }

        let payload_dir = staging.payload_dir(STEP_NAME, PAYLOAD_DIR)?;
        log::info!("Creating and saving {} {}x{} matrices", n, m, m);

        let mut paths = Vec::with_capacity(n);
        for index in 0..n {
            let matrix = generate_matrix(m, self.params.seed, index);
            let path = payload_dir.join(format!("matrix_{}.csv", index));
            write_matrix_csv(&path, &matrix)?;
            log::debug!("Saved matrix {} to {}", index, path.display());
            paths.push(path);
        }

        let manifest = Manifest::new(paths);
        manifest.write(staging.manifest_path(STEP_NAME))?;
        Ok(manifest)
    }
}
