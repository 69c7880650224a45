//! Template expansion backed by tera.
//!
//! On top of tera's built-in filters and functions, templates get a
//! `to_yaml` helper, usable as `{{ value | to_yaml }}` or
//! `{{ to_yaml(value=value) }}`. The helper is best effort: a value that
//! cannot be converted is logged and replaced with an empty string so the
//! rest of the manifest still renders.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

use crate::error::TemplateError;

const TEMPLATE_NAME: &str = "compiled_template";
const TO_YAML: &str = "to_yaml";

/// Expand `template` against `context`.
///
/// Fails when the text does not parse or when execution hits a
/// non-helper error, e.g. an undefined variable.
pub fn render(template: &str, context: &Context) -> Result<String, TemplateError> {
    let tera = compile(template)?;
    tera.render(TEMPLATE_NAME, context)
        .map_err(TemplateError::Render)
}

/// Expand `template` with variables taken from a serializable map-like value.
pub fn render_serialize<T: Serialize>(template: &str, values: &T) -> Result<String, TemplateError> {
    let context = Context::from_serialize(values).map_err(TemplateError::Context)?;
    render(template, &context)
}

fn compile(template: &str) -> Result<Tera, TemplateError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.register_filter(TO_YAML, to_yaml_filter);
    tera.register_function(TO_YAML, to_yaml_function);
    tera.add_raw_template(TEMPLATE_NAME, template)
        .map_err(TemplateError::Parse)?;
    Ok(tera)
}

/// Serialize `value` as a YAML block without the trailing newline.
///
/// The value goes through JSON first, then JSON is converted to YAML. Any
/// failure is logged and yields `""`; this never returns an error.
pub fn to_safe_yaml<T: Serialize + ?Sized>(value: &T) -> String {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("[to_yaml] Error marshaling value: {}", e);
            return String::new();
        }
    };

    let yaml = serde_yaml::from_str::<serde_yaml::Value>(&json)
        .and_then(|doc| serde_yaml::to_string(&doc));
    match yaml {
        Ok(yaml) => yaml.strip_suffix('\n').unwrap_or(&yaml).to_string(),
        Err(e) => {
            log::error!("[to_yaml] Error converting json to yaml for {}: {}", json, e);
            String::new()
        }
    }
}

fn to_yaml_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(to_safe_yaml(value)))
}

fn to_yaml_function(args: &HashMap<String, Value>) -> tera::Result<Value> {
    match args.get("value") {
        Some(value) => Ok(Value::String(to_safe_yaml(value))),
        None => Err(tera::Error::msg(
            "Function `to_yaml` was called without a `value` argument",
        )),
    }
}
