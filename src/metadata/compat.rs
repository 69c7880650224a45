//! Driver-version constraints attached to Kubernetes versions.

use serde::{Deserialize, Serialize};

use crate::version::compare;
use std::cmp::Ordering;

/// Inclusive driver version bounds for one Kubernetes version.
///
/// A missing bound leaves that side open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_driver_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_driver_version: Option<String>,
}

impl VersionRange {
    pub fn new(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            min_driver_version: min.map(str::to_string),
            max_driver_version: max.map(str::to_string),
        }
    }

    /// Whether `driver_version` lies within the bounds.
    pub fn contains(&self, driver_version: &str) -> bool {
        let above_max = self
            .max_driver_version
            .as_deref()
            .filter(|max| !max.is_empty())
            .is_some_and(|max| compare(driver_version, max) == Ordering::Greater);
        let below_min = self
            .min_driver_version
            .as_deref()
            .filter(|min| !min.is_empty())
            .is_some_and(|min| compare(driver_version, min) == Ordering::Less);
        !(above_max || below_min)
    }
}

/// Decide whether a catalog entry may be used with `driver_version`.
///
/// Entries without a registered range are always compatible.
pub fn is_compatible(driver_version: &str, range: Option<&VersionRange>) -> bool {
    range.is_none_or(|range| range.contains(driver_version))
}
