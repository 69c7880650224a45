//! Catalog sources: the embedded default and operator-supplied files.

use std::fs;
use std::path::Path;

use super::types::RawCatalog;
use crate::error::Result;

/// Catalog compiled into the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.yaml");

/// On-disk catalog encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Yaml,
        }
    }
}

/// Parse catalog text in the given format.
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<RawCatalog> {
    let catalog: RawCatalog = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(catalog)
}

/// The catalog shipped with the crate.
pub fn embedded_catalog() -> Result<RawCatalog> {
    parse_catalog(EMBEDDED_CATALOG, CatalogFormat::Yaml)
}

/// Load the catalog at `path`, or the embedded one when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<RawCatalog> {
    match path {
        Some(path) => {
            log::info!("Loading catalog from {}", path.display());
            let content = fs::read_to_string(path)?;
            parse_catalog(&content, CatalogFormat::from_path(path))
        }
        None => {
            log::debug!("Using embedded catalog");
            embedded_catalog()
        }
    }
}
