//! Versioned add-on template families.
//!
//! A family maps minor buckets (`v1.15`) to template text and must carry a
//! `default` entry. Validation happens when the registry is built, so
//! [`TemplateRegistry::select`] never has to fail for a registered family.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::FatalInitError;
use crate::version::minor_bucket;

/// Bucket key every family must define.
pub const DEFAULT_TEMPLATE_KEY: &str = "default";

/// Templates of one add-on keyed by minor bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateFamily {
    templates: BTreeMap<String, String>,
}

impl TemplateFamily {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    /// Template for `k8s_version`'s minor bucket, falling back to `default`.
    pub fn select(&self, k8s_version: &str) -> &str {
        let bucket = minor_bucket(k8s_version);
        self.templates
            .get(&bucket)
            .or_else(|| self.templates.get(DEFAULT_TEMPLATE_KEY))
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn has_default(&self) -> bool {
        self.templates
            .get(DEFAULT_TEMPLATE_KEY)
            .is_some_and(|text| !text.trim().is_empty())
    }
}

/// All template families, validated at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateRegistry {
    families: BTreeMap<String, TemplateFamily>,
}

impl TemplateRegistry {
    /// Build a registry, requiring a non-empty `default` in every family and
    /// the presence of every name in `required`.
    pub fn new(
        families: BTreeMap<String, BTreeMap<String, String>>,
        required: &[&str],
    ) -> Result<Self, FatalInitError> {
        let families: BTreeMap<String, TemplateFamily> = families
            .into_iter()
            .map(|(name, templates)| (name, TemplateFamily::new(templates)))
            .collect();

        for (name, family) in &families {
            if !family.has_default() {
                return Err(FatalInitError::MissingDefaultTemplate(name.clone()));
            }
        }

        for name in required {
            if !families.contains_key(*name) {
                return Err(FatalInitError::MissingTemplateFamily(name.to_string()));
            }
        }

        Ok(Self { families })
    }

    /// Template text of `family` applicable to `k8s_version`.
    ///
    /// `None` only when the family is not registered.
    pub fn select(&self, family: &str, k8s_version: &str) -> Option<&str> {
        self.families.get(family).map(|f| f.select(k8s_version))
    }

    /// Registered family names in sorted order.
    pub fn family_names(&self) -> Vec<&str> {
        self.families.keys().map(String::as_str).collect()
    }
}

/// Overlay `overrides` onto `base` bucket by bucket.
pub fn merge_families(
    mut base: BTreeMap<String, BTreeMap<String, String>>,
    overrides: &BTreeMap<String, BTreeMap<String, String>>,
) -> BTreeMap<String, BTreeMap<String, String>> {
    for (name, templates) in overrides {
        let family = base.entry(name.clone()).or_default();
        for (bucket, text) in templates {
            family.insert(bucket.clone(), text.clone());
        }
    }
    base
}
