//! Invert staged matrices under a parallel map.
use anyhow::Result;
use rayon::prelude::*;

use crate::manifest::{self, Manifest};
use crate::staging::StagingArea;
use crate::steps::invert::invert_one;
use crate::steps::{mapped_raw, Step, StepParams};

pub(crate) const STEP_NAME: &str = "mappedinvert";
pub(crate) const PAYLOAD_DIR: &str = "inverted";

/// As `invert`, but each item runs on the rayon thread pool.
///
/// The item index comes from the input filename, so manifest order does not
/// depend on which worker finishes first.
pub struct MappedInvertStep {
    params: StepParams,
}

impl MappedInvertStep {
    pub fn new(params: StepParams) -> Self {
        Self { params }
    }
}

impl Step for MappedInvertStep {
    fn name(&self) -> &str {
        STEP_NAME
    }

    fn upstream(&self) -> Option<&str> {
        Some(mapped_raw::STEP_NAME)
    }

    fn run(&self, staging: &StagingArea) -> Result<Manifest> {
        let inputs =
            self.params
                .source
                .resolve(staging, self.upstream(), &self.params.filepath_column)?;
        let payload_dir = staging.payload_dir(STEP_NAME, PAYLOAD_DIR)?;
        log::info!("Inverting {} matrices in parallel", inputs.len());

        let mut items = inputs
            .par_iter()
            .enumerate()
            .map(|(position, input)| {
                let path = invert_one(input, &payload_dir)?;
                let index = manifest::index_from_filename(input).unwrap_or(position);
                Ok((index, path))
            })
            .collect::<Result<Vec<_>>>()?;
        items.sort_by_key(|(index, _)| *index);

        let manifest = Manifest::new(items.into_iter().map(|(_, path)| path).collect());
        manifest.write(staging.manifest_path(STEP_NAME))?;
        Ok(manifest)
    }
}
