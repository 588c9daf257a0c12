use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the workflow configuration file searched in the working directory.
pub const CONFIG_FILE_NAME: &str = "workflow_config.json";

/// Staging root used when no configuration file is present.
pub const DEFAULT_STAGING_DIR: &str = "local_staging";

/// Project-level workflow configuration.
///
/// Unknown keys are tolerated, so the same `workflow_config.json` can carry
/// settings for outer tooling.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Staging directory shared by every step. When workers run on separate
    /// machines this path must sit on a filesystem all of them can reach.
    pub project_local_staging_dir: PathBuf,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            project_local_staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
        }
    }
}

/// Load a workflow configuration from an explicit JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WorkflowConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: WorkflowConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Load `workflow_config.json` from the working directory, falling back to
/// defaults when the file does not exist.
pub fn load_default_config() -> Result<WorkflowConfig> {
    let path = Path::new(CONFIG_FILE_NAME);
    if !path.exists() {
        log::debug!("No {} found; using defaults", CONFIG_FILE_NAME);
        return Ok(WorkflowConfig::default());
    }
    load_config(path)
}
