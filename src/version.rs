//! Kubernetes and driver version tags.
//!
//! Tags such as `v1.15.3-rancher1-1` are treated as plain strings. Ordering is
//! raw lexicographic comparison, so `v1.9` sorts after `v1.10`; the embedded
//! catalogs are authored against that ordering.

use std::cmp::Ordering;

/// Separator between version components.
const COMPONENT_SEPARATOR: char = '.';

/// Grouping key for a release line: the first two dot components of a tag.
///
/// Returns an empty string when the tag has fewer than two components.
///
/// ```
/// use k8s_driver_metadata::version::minor_bucket;
///
/// assert_eq!(minor_bucket("v1.15.3"), "v1.15");
/// assert_eq!(minor_bucket("v1"), "");
/// ```
pub fn minor_bucket(version: &str) -> String {
    let parts: Vec<&str> = version.split(COMPONENT_SEPARATOR).collect();
    if parts.len() < 2 {
        return String::new();
    }
    parts[..2].join(".")
}

/// Compare two version tags by raw string order.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// True when `a` sorts strictly after `b`.
pub fn is_newer(a: &str, b: &str) -> bool {
    compare(a, b) == Ordering::Greater
}
