//! Configuration loading from file system

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::types::WindowsConfig;

/// Default config location: ~/.arc/windows.json
pub fn default_config_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".arc").join("windows.json")
}

/// Load configuration from `path`, or ~/.arc/windows.json when `None`.
///
/// Returns WindowsConfig::default() if the file is missing, unreadable or
/// not valid JSON.
#[instrument(name = "load_config")]
pub fn load_config(path: Option<&Path>) -> WindowsConfig {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        return WindowsConfig::default();
    }

    let contents = match fs::read_to_string(&config_path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(error = %e, path = %config_path.display(), "Failed to read config, using defaults");
            return WindowsConfig::default();
        }
    };

    match serde_json::from_str::<WindowsConfig>(&contents) {
        Ok(config) => {
            info!(path = %config_path.display(), "Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(
                error = %e,
                path = %config_path.display(),
                "Failed to parse config JSON, using defaults"
            );
            WindowsConfig::default()
        }
    }
}
