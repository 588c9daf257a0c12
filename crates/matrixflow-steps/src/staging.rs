//! Staging-directory layout shared by all steps.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::WorkflowConfig;

/// Filename of the per-step manifest.
pub const MANIFEST_FILE_NAME: &str = "manifest.csv";

/// The staging root every step reads from and writes to.
///
/// Each step owns `<root>/<step_name>/`: payload files go in a step-specific
/// subdirectory and the step's `manifest.csv` sits at the step directory
/// root. Steps never write outside their own directory.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self::new(config.project_local_staging_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Payload subdirectory under a step's directory, created on demand.
    pub fn payload_dir(&self, step_name: &str, subdir: &str) -> Result<PathBuf> {
        let dir = self.root.join(step_name).join(subdir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create staging directory: {}", dir.display()))?;
        Ok(dir)
    }

    /// Path of a step's manifest. The file may not exist yet.
    pub fn manifest_path(&self, step_name: &str) -> PathBuf {
        self.root.join(step_name).join(MANIFEST_FILE_NAME)
    }

    /// Remove one step's directory. A missing directory is not an error.
    pub fn clean_step(&self, step_name: &str) -> Result<()> {
        let dir = self.root.join(step_name);
        if dir.exists() {
            fs::remove_dir_all(&dir)
                .with_context(|| format!("Failed to remove step directory: {}", dir.display()))?;
            log::info!("Removed staging for step '{}': {}", step_name, dir.display());
        }
        Ok(())
    }

    /// Remove the entire staging root. A missing root is not an error.
    pub fn clean_all(&self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)
                .with_context(|| format!("Failed to remove staging root: {}", self.root.display()))?;
            log::info!("Removed staging root: {}", self.root.display());
        }
        Ok(())
    }
}
