//! Driver-compatible Kubernetes metadata.
//!
//! [`Metadata::build`] runs the resolver and validates the template
//! registry once. The result is immutable and can be shared freely across
//! threads, either by reference or through the process-wide slot installed
//! with [`init_global`].

pub mod catalog;
pub mod compat;
pub mod resolve;
pub mod snapshot;
pub mod types;

pub use catalog::{embedded_catalog, load_catalog};
pub use compat::{is_compatible, VersionRange};
pub use resolve::{resolve, validate_catalog, Resolution};
pub use types::{
    ArtifactSet, RancherVersionRange, RawCatalog, ServiceOptions, SystemImages, ToolsSystemImages,
    WindowsSystemImages,
};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use crate::error::FatalInitError;
use crate::templates::{builtin_families, registry::merge_families, TemplateRegistry, REQUIRED_FAMILIES};

/// Resolved metadata for one driver version.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    driver_version: String,
    default_k8s_version: Option<String>,
    k8s_versions: BTreeMap<String, ArtifactSet>,
    current_versions: BTreeMap<String, String>,
    #[serde(skip)]
    excluded_versions: BTreeSet<String>,
    templates: TemplateRegistry,
    k8s_version_driver_versions: BTreeMap<String, VersionRange>,
    driver_default_k8s_versions: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    k8s_version_rancher_versions: BTreeMap<String, RancherVersionRange>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    rancher_default_k8s_versions: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "ToolsSystemImages::is_empty")]
    tools_system_images: ToolsSystemImages,
}

impl Metadata {
    /// Resolve `catalog` for `driver_version` and build the template registry.
    ///
    /// Templates carried by the catalog are layered over the built-in families.
    /// Range, default and management-server tables are kept whole for the snapshot.
    pub fn build(catalog: &RawCatalog, driver_version: &str) -> Result<Self, FatalInitError> {
        let resolution = resolve(catalog, driver_version)?;
        let families = merge_families(builtin_families(), &catalog.k8s_versioned_templates);
        let templates = TemplateRegistry::new(families, REQUIRED_FAMILIES)?;

        if !resolution.excluded.is_empty() {
            log::debug!(
                "Kubernetes versions not supported by driver {}: {}",
                driver_version,
                resolution.excluded.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }

        Ok(Self {
            driver_version: driver_version.to_string(),
            default_k8s_version: resolution.default_version,
            k8s_versions: resolution.resolved,
            current_versions: resolution.current,
            excluded_versions: resolution.excluded,
            templates,
            k8s_version_driver_versions: catalog.k8s_version_driver_versions.clone(),
            driver_default_k8s_versions: catalog.driver_default_k8s_versions.clone(),
            k8s_version_rancher_versions: catalog.k8s_version_rancher_versions.clone(),
            rancher_default_k8s_versions: catalog.rancher_default_k8s_versions.clone(),
            tools_system_images: catalog.tools_system_images.clone(),
        })
    }

    pub fn driver_version(&self) -> &str {
        &self.driver_version
    }

    /// Default Kubernetes version for the driver, guaranteed to be resolved.
    pub fn default_k8s_version(&self) -> Option<&str> {
        self.default_k8s_version.as_deref()
    }

    /// Artifacts of a compatible Kubernetes version.
    pub fn artifacts_for(&self, k8s_version: &str) -> Option<&ArtifactSet> {
        self.k8s_versions.get(k8s_version)
    }

    /// All compatible Kubernetes versions with their artifacts.
    pub fn k8s_versions(&self) -> &BTreeMap<String, ArtifactSet> {
        &self.k8s_versions
    }

    /// Current version of a minor bucket such as `v1.15`.
    pub fn current_version_for(&self, bucket: &str) -> Option<&str> {
        self.current_versions.get(bucket).map(String::as_str)
    }

    /// Minor bucket -> current version.
    pub fn current_versions(&self) -> &BTreeMap<String, String> {
        &self.current_versions
    }

    /// Versions rejected by their driver range.
    pub fn excluded_versions(&self) -> &BTreeSet<String> {
        &self.excluded_versions
    }

    /// Registered template family names.
    pub fn template_families(&self) -> Vec<&str> {
        self.templates.family_names()
    }

    /// Template of `family` for `k8s_version`; `None` for an unknown family.
    pub fn select_template(&self, family: &str, k8s_version: &str) -> Option<&str> {
        self.templates.select(family, k8s_version)
    }
}

static GLOBAL: OnceLock<Metadata> = OnceLock::new();

/// Install the process-wide metadata. Only the first call succeeds.
pub fn init_global(metadata: Metadata) -> Result<&'static Metadata, FatalInitError> {
    GLOBAL
        .set(metadata)
        .map_err(|_| FatalInitError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(FatalInitError::AlreadyInitialized)
}

/// The process-wide metadata, once [`init_global`] has run.
pub fn global() -> Option<&'static Metadata> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded(driver_version: &str) -> Metadata {
        Metadata::build(&embedded_catalog().unwrap(), driver_version).unwrap()
    }

    #[test]
    fn test_build_from_embedded_catalog() {
        let metadata = embedded("v0.3.0");
        assert_eq!(metadata.driver_version(), "v0.3.0");
        assert_eq!(metadata.default_k8s_version(), Some("v1.15.5-rancher1-1"));
        assert!(metadata.artifacts_for("v1.15.5-rancher1-1").is_some());
        assert!(metadata.artifacts_for("v1.16.2-rancher1-1").is_none());
        assert!(metadata.excluded_versions().contains("v1.13.10-rancher1-2"));
        assert!(metadata.excluded_versions().contains("v1.16.2-rancher1-1"));
    }

    #[test]
    fn test_current_versions_from_embedded_catalog() {
        let metadata = embedded("v0.3.1");
        assert_eq!(metadata.current_version_for("v1.13"), Some("v1.13.12-rancher1-1"));
        assert_eq!(metadata.current_version_for("v1.14"), Some("v1.14.8-rancher1-1"));
        assert_eq!(metadata.current_version_for("v1.15"), Some("v1.15.5-rancher1-1"));
        assert_eq!(metadata.current_version_for("v1.16"), Some("v1.16.2-rancher1-1"));
        assert_eq!(metadata.current_version_for("v1.12"), None);
    }

    #[test]
    fn test_old_driver_keeps_old_versions() {
        let metadata = embedded("v0.2.8");
        assert_eq!(metadata.default_k8s_version(), Some("v1.14.8-rancher1-1"));
        assert!(metadata.artifacts_for("v1.13.10-rancher1-2").is_some());
        assert!(metadata.artifacts_for("v1.16.2-rancher1-1").is_none());
    }

    #[test]
    fn test_catalog_templates_override_builtins() {
        let mut catalog = embedded_catalog().unwrap();
        let mut weave = BTreeMap::new();
        weave.insert("default".to_string(), "weave {{ k8s_version }}".to_string());
        catalog.k8s_versioned_templates.insert("weave".to_string(), weave);

        let metadata = Metadata::build(&catalog, "v0.3.0").unwrap();
        assert_eq!(
            metadata.select_template("weave", "v1.15.5-rancher1-1"),
            Some("weave {{ k8s_version }}")
        );
        assert!(metadata.select_template("calico", "v1.15.5-rancher1-1").is_some());
    }

    #[test]
    fn test_catalog_template_without_default_is_fatal() {
        let mut catalog = embedded_catalog().unwrap();
        let mut weave = BTreeMap::new();
        weave.insert("v1.15".to_string(), "weave".to_string());
        catalog.k8s_versioned_templates.insert("weave".to_string(), weave);

        let err = Metadata::build(&catalog, "v0.3.0").unwrap_err();
        assert_eq!(err, FatalInitError::MissingDefaultTemplate("weave".to_string()));
    }

    #[test]
    fn test_build_without_default_table_has_no_default() {
        let mut catalog = embedded_catalog().unwrap();
        catalog.driver_default_k8s_versions.clear();

        let metadata = Metadata::build(&catalog, "v0.3.0").unwrap();
        assert_eq!(metadata.default_k8s_version(), None);
        assert!(metadata.artifacts_for("v1.15.5-rancher1-1").is_some());
        assert_eq!(metadata.current_version_for("v1.15"), Some("v1.15.5-rancher1-1"));
    }

    #[test]
    fn test_template_families_include_catalog_families() {
        let mut catalog = embedded_catalog().unwrap();
        let mut weave = BTreeMap::new();
        weave.insert("default".to_string(), "weave".to_string());
        catalog.k8s_versioned_templates.insert("weave".to_string(), weave);

        let metadata = Metadata::build(&catalog, "v0.3.0").unwrap();
        assert_eq!(metadata.template_families(), vec!["calico", "canal", "flannel", "weave"]);
    }

    #[test]
    fn test_metadata_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Metadata>();
    }
}
