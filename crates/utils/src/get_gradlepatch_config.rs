use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gradlepatch_core::Config;
use tokio::fs::read_to_string;

#[must_use]
pub fn get_gradlepatch_dir(current_dir: &Path) -> PathBuf {
    current_dir.join(".gradlepatch")
}

/// Load `.gradlepatch/config.json` below `current_dir`, or the defaults when it does not exist
///
/// # Errors
/// Returns error if the file exists but cannot be read or is not valid JSON.
pub async fn get_gradlepatch_config(current_dir: &Path) -> Result<Config> {
    let config_file = get_gradlepatch_dir(current_dir).join("config.json");
    if !config_file.is_file() {
        return Ok(Config::default());
    }
    let content = read_to_string(&config_file)
        .await
        .context(format!("Failed to read {}", config_file.display()))?;
    serde_json::from_str(&content).context(format!("Invalid config - {}", config_file.display()))
}
