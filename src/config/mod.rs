pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".kdm.toml";

/// Get the global config file path (~/.kdm.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (dir/.kdm.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from an explicit file
pub fn load_config_file(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}

/// Load configuration from file or use defaults
/// Checks local config first, then global config
pub fn load_config(dir: Option<&Path>) -> Result<types::Config> {
    // Try local config first
    if let Some(dir) = dir {
        let local = local_config_path(dir);
        if local.exists() {
            match load_config_file(&local) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("Ignoring {}: {}", local.display(), e),
            }
        }
    }

    // Try global config
    if let Some(global) = global_config_path() {
        if global.exists() {
            match load_config_file(&global) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("Ignoring {}: {}", global.display(), e),
            }
        }
    }

    Ok(types::Config::default())
}
