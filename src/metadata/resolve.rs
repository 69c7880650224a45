//! Builds the driver-compatible view of a raw catalog.
//!
//! Resolution runs once at startup. Every failure is a [`FatalInitError`]:
//! the catalog is embedded or operator supplied, so an inconsistency cannot
//! be repaired by retrying.

use std::collections::{BTreeMap, BTreeSet};

use super::compat::is_compatible;
use super::types::{ArtifactSet, RawCatalog};
use crate::error::FatalInitError;
use crate::version::{is_newer, minor_bucket};

/// Key of the default-table entry used when the driver version has none.
pub const FALLBACK_DEFAULT_KEY: &str = "default";

/// Output of [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Compatible Kubernetes versions and their artifacts.
    pub resolved: BTreeMap<String, ArtifactSet>,
    /// Minor bucket -> greatest resolved version in that bucket.
    pub current: BTreeMap<String, String>,
    /// Versions rejected by their driver range.
    pub excluded: BTreeSet<String>,
    /// Default Kubernetes version for the driver, when the table has one.
    pub default_version: Option<String>,
}

/// Filter `catalog` for `driver_version` and derive the per-bucket current versions.
pub fn resolve(catalog: &RawCatalog, driver_version: &str) -> Result<Resolution, FatalInitError> {
    validate_catalog(catalog)?;

    let mut resolution = Resolution::default();

    for (k8s_version, images) in &catalog.k8s_version_system_images {
        let range = catalog.k8s_version_driver_versions.get(k8s_version);
        if !is_compatible(driver_version, range) {
            log::debug!(
                "Excluding Kubernetes {} for driver {} (range {:?})",
                k8s_version,
                driver_version,
                range
            );
            resolution.excluded.insert(k8s_version.clone());
            continue;
        }

        resolution.resolved.insert(
            k8s_version.clone(),
            ArtifactSet {
                system_images: images.clone(),
                service_options: catalog.k8s_version_service_options.get(k8s_version).cloned(),
                windows_system_images: catalog
                    .k8s_version_windows_system_images
                    .get(k8s_version)
                    .cloned(),
                windows_service_options: catalog
                    .k8s_version_windows_service_options
                    .get(k8s_version)
                    .cloned(),
            },
        );

        let bucket = minor_bucket(k8s_version);
        let newest = resolution
            .current
            .get(&bucket)
            .is_none_or(|current| is_newer(k8s_version, current));
        if newest {
            resolution.current.insert(bucket, k8s_version.clone());
        }
    }

    resolution.default_version = lookup_default(catalog, driver_version);
    match &resolution.default_version {
        Some(default_version) if !resolution.resolved.contains_key(default_version) => {
            return Err(FatalInitError::DefaultVersionNotResolved {
                driver_version: driver_version.to_string(),
                default_version: default_version.clone(),
            });
        }
        Some(default_version) => {
            log::info!(
                "Default Kubernetes version for driver {} is {}",
                driver_version,
                default_version
            );
        }
        None => {
            log::warn!("No default Kubernetes version registered for driver {}", driver_version);
        }
    }

    log::debug!(
        "Resolved {} Kubernetes versions ({} excluded) across {} minor versions",
        resolution.resolved.len(),
        resolution.excluded.len(),
        resolution.current.len()
    );

    Ok(resolution)
}

/// Check the cross references inside a raw catalog, independent of any driver version.
///
/// The Kubernetes image of every entry must be a prefix of
/// `<kubernetes_image_repo>:<version>`, and every default-table entry must be
/// a catalog key.
pub fn validate_catalog(catalog: &RawCatalog) -> Result<(), FatalInitError> {
    for (k8s_version, images) in &catalog.k8s_version_system_images {
        let expected = format!("{}:{}", catalog.kubernetes_image_repo, k8s_version);
        if images.kubernetes.is_empty() || !expected.starts_with(&images.kubernetes) {
            return Err(FatalInitError::ImageTagMismatch {
                version: k8s_version.clone(),
                image: images.kubernetes.clone(),
                expected,
            });
        }
    }

    for default_version in catalog.driver_default_k8s_versions.values() {
        if !catalog.k8s_version_system_images.contains_key(default_version) {
            return Err(FatalInitError::DefaultVersionUnknown(default_version.clone()));
        }
    }

    Ok(())
}

fn lookup_default(catalog: &RawCatalog, driver_version: &str) -> Option<String> {
    let table = &catalog.driver_default_k8s_versions;
    table
        .get(driver_version)
        .or_else(|| table.get(FALLBACK_DEFAULT_KEY))
        .cloned()
}
