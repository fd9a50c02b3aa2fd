//! File-based configuration loading

use super::model::FinsentConfig;
use crate::error::{FinsentError, FinsentResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the user configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("finsent").join("config.toml"))
}

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> FinsentResult<FinsentConfig> {
    if !path.exists() {
        debug!("config file {} not found, using defaults", path.display());
        return Ok(FinsentConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        FinsentError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config: FinsentConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            FinsentError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            FinsentError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            FinsentError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    debug!("loaded configuration from {}", path.display());
    Ok(config)
}
