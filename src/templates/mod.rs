//! Versioned add-on templates: registry, selection and rendering.

pub mod builtin;
pub mod registry;
pub mod render;

pub use builtin::{builtin_families, REQUIRED_FAMILIES};
pub use registry::{TemplateFamily, TemplateRegistry, DEFAULT_TEMPLATE_KEY};
pub use render::{render, render_serialize, to_safe_yaml};

use serde::Serialize;
use std::collections::BTreeMap;
use tera::Context;

use crate::error::TemplateError;
use crate::metadata::types::{ServiceOptions, SystemImages};
use crate::metadata::ArtifactSet;

pub const DEFAULT_CLUSTER_CIDR: &str = "10.42.0.0/16";
pub const DEFAULT_KUBE_CONFIG: &str = "/etc/kubernetes/ssl/kubecfg-kube-node.yaml";

/// Variables the built-in network templates expect.
#[derive(Debug, Clone, Serialize)]
pub struct AddonValues<'a> {
    pub k8s_version: &'a str,
    pub images: &'a SystemImages,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a ServiceOptions>,
    pub cluster_cidr: String,
    pub kube_config: String,
    pub rbac_enabled: bool,
    pub node_selector: BTreeMap<String, String>,
}

impl<'a> AddonValues<'a> {
    pub fn new(k8s_version: &'a str, artifacts: &'a ArtifactSet) -> Self {
        Self {
            k8s_version,
            images: &artifacts.system_images,
            options: artifacts.service_options.as_ref(),
            cluster_cidr: DEFAULT_CLUSTER_CIDR.to_string(),
            kube_config: DEFAULT_KUBE_CONFIG.to_string(),
            rbac_enabled: true,
            node_selector: BTreeMap::new(),
        }
    }

    /// Build a tera context, letting `overrides` replace or add top-level keys.
    pub fn into_context(self, overrides: Option<&Context>) -> Result<Context, TemplateError> {
        let mut context = Context::from_serialize(&self).map_err(TemplateError::Context)?;
        if let Some(overrides) = overrides {
            context.extend(overrides.clone());
        }
        Ok(context)
    }
}
