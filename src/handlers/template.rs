use std::fs;
use std::path::Path;
use tera::Context;

use crate::error::{MetadataError, TemplateError};
use crate::metadata::Metadata;
use crate::templates::{render, AddonValues};

pub fn handle_template(
    metadata: &Metadata,
    family: &str,
    k8s_version: &str,
    values: Option<&Path>,
    raw: bool,
) -> crate::Result<()> {
    let output = template_output(metadata, family, k8s_version, values, raw)?;
    println!("{}", output);
    Ok(())
}

/// Selected (and unless `raw`, rendered) template text.
pub fn template_output(
    metadata: &Metadata,
    family: &str,
    k8s_version: &str,
    values: Option<&Path>,
    raw: bool,
) -> crate::Result<String> {
    let template = metadata.select_template(family, k8s_version).ok_or_else(|| {
        MetadataError::NotFound(format!(
            "template family '{}' (available: {})",
            family,
            metadata.template_families().join(", ")
        ))
    })?;

    if raw {
        return Ok(template.to_string());
    }

    let artifacts = metadata.artifacts_for(k8s_version).ok_or_else(|| {
        MetadataError::NotFound(format!(
            "Kubernetes version {} for driver {}",
            k8s_version,
            metadata.driver_version()
        ))
    })?;

    let overrides = match values {
        Some(path) => load_values(path)?,
        None => None,
    };
    let context = AddonValues::new(k8s_version, artifacts).into_context(overrides.as_ref())?;
    Ok(render(template, &context)?)
}

/// Read a YAML or JSON values file into a template context.
///
/// An empty document carries no overrides.
fn load_values(path: &Path) -> crate::Result<Option<Context>> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_yaml::from_str(&content)?;
    if value.is_null() {
        log::debug!("{} has no values, using defaults", path.display());
        return Ok(None);
    }
    Context::from_value(value)
        .map(Some)
        .map_err(|e| MetadataError::Template(TemplateError::Context(e)))
}
