use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metadata::snapshot::DEFAULT_DATA_FILE;

/// Driver version assumed when neither the CLI nor the config names one.
pub const DEFAULT_DRIVER_VERSION: &str = "v0.3.0";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Version of the cluster driver the metadata is resolved for
    #[serde(default = "default_driver_version")]
    pub driver_version: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Catalog source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (JSON or YAML); the embedded catalog is used when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Mirror repository the catalog's Kubernetes images are moved to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_image_repo: Option<String>,
}

/// Snapshot output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Write the snapshot every time metadata is initialized
    #[serde(default)]
    pub write_data: bool,
}

fn default_driver_version() -> String {
    DEFAULT_DRIVER_VERSION.to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver_version: default_driver_version(),
            catalog: CatalogConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            write_data: false,
        }
    }
}
