//! Configuration management for the workspace module client.

pub mod paths;
pub mod settings;

pub use paths::config_file;
pub use settings::{ApiConfig, ModuleConfig};

use std::path::{Path, PathBuf};

use crate::error::{ModuleError, Result};

/// Load configuration from the default config file.
///
/// If the config file doesn't exist, returns default configuration.
pub fn load_config() -> Result<ModuleConfig> {
    let path = config_file()?;
    load_config_from(&path)
}

/// Load configuration from a specific path.
///
/// If the file doesn't exist, returns default configuration.
pub fn load_config_from(path: &Path) -> Result<ModuleConfig> {
    if !path.exists() {
        return Ok(ModuleConfig::default().with_env_overrides());
    }

    let contents = std::fs::read_to_string(path)?;
    let config: ModuleConfig =
        toml::from_str(&contents).map_err(|e| ModuleError::ConfigRead(e.to_string()))?;

    Ok(config.with_env_overrides())
}

/// Save configuration to a specific path.
pub fn save_config_to(config: &ModuleConfig, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ModuleError::ConfigWrite(e.to_string()))?;
    std::fs::write(path, contents)?;

    Ok(())
}

/// Resolve the snapshot file: command-line override, then config, then default.
pub fn snapshot_path(config: &ModuleConfig, override_path: Option<PathBuf>) -> Result<PathBuf> {
    match override_path.or_else(|| config.module.snapshot_file.clone()) {
        Some(path) => Ok(path),
        None => paths::snapshot_file(),
    }
}
