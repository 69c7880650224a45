//! # Kubernetes driver metadata
//!
//! Resolves which Kubernetes versions, system images, service options and
//! add-on templates a cluster driver version can deploy.
//!
//! ## Features
//!
//! - **Compatibility filtering**: drops catalog entries outside their min/max driver range
//! - **Current versions**: picks the newest tag of every minor release line
//! - **Versioned templates**: per-minor add-on templates with a mandatory default
//! - **Safe rendering**: tera templates with a best-effort `to_yaml` helper
//!
//! ## Example
//!
//! ```rust,no_run
//! use k8s_driver_metadata::metadata::{embedded_catalog, Metadata};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metadata = Metadata::build(&embedded_catalog()?, "v0.3.0")?;
//! if let Some(version) = metadata.current_version_for("v1.15") {
//!     println!("{}", metadata.select_template("calico", version).unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metadata;
pub mod templates;
pub mod version;

// Re-export commonly used types and functions
pub use error::{FatalInitError, MetadataError, Result, TemplateError};
pub use metadata::{ArtifactSet, Metadata};
pub use templates::{render, TemplateRegistry};

use cli::Commands;
use config::types::Config;
use metadata::{load_catalog, snapshot::write_snapshot};

/// Load the configured catalog and resolve it for the configured driver version.
///
/// A configured Kubernetes image repository moves the catalog's images to
/// that mirror before validation. Writes the snapshot when `output.write_data`
/// is set.
pub fn build_metadata(config: &Config) -> Result<Metadata> {
    let mut catalog = load_catalog(config.catalog.path.as_deref())?;
    if let Some(repo) = &config.catalog.kubernetes_image_repo {
        catalog.mirror_kubernetes_images(repo);
    }

    let metadata = Metadata::build(&catalog, &config.driver_version)?;

    if config.output.write_data {
        write_snapshot(&config.output.data_file, &metadata)?;
    }
    Ok(metadata)
}

pub fn run_command(command: Commands, metadata: &Metadata, config: &Config) -> Result<()> {
    match command {
        Commands::Resolve { json } => handlers::handle_resolve(metadata, json),
        Commands::Current { json } => handlers::handle_current(metadata, json),
        Commands::Images { k8s_version, json } => {
            handlers::handle_images(metadata, &k8s_version, json)
        }
        Commands::Template {
            family,
            k8s_version,
            values,
            raw,
        } => handlers::handle_template(metadata, &family, &k8s_version, values.as_deref(), raw),
        Commands::Export { output } => {
            let output = output.unwrap_or_else(|| config.output.data_file.clone());
            handlers::handle_export(metadata, &output)
        }
    }
}
