//! Platform-specific path utilities for the workspace module client.

use std::path::PathBuf;

use crate::error::{ModuleError, Result};

const APP_DIR: &str = "workspace-module";

/// Get the configuration directory.
///
/// - Linux: `~/.config/workspace-module`
/// - macOS: `~/Library/Application Support/workspace-module`
/// - Windows: `%APPDATA%\workspace-module`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| ModuleError::Config("Cannot determine config directory".to_string()))?;
    Ok(base.join(APP_DIR))
}

/// Get the data directory.
///
/// - Linux: `~/.local/share/workspace-module`
/// - macOS: `~/Library/Application Support/workspace-module`
/// - Windows: `%APPDATA%\workspace-module`
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| ModuleError::Config("Cannot determine data directory".to_string()))?;
    Ok(base.join(APP_DIR))
}

/// Get the main configuration file path.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the default snapshot file path.
pub fn snapshot_file() -> Result<PathBuf> {
    Ok(data_dir()?.join("snapshot.json"))
}
