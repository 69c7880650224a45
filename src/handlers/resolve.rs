use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::MetadataError;
use crate::metadata::{ArtifactSet, Metadata};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveSummary<'a> {
    driver_version: &'a str,
    default_k8s_version: Option<&'a str>,
    k8s_versions: Vec<&'a str>,
    current_versions: &'a BTreeMap<String, String>,
    excluded_versions: Vec<&'a str>,
}

pub fn handle_resolve(metadata: &Metadata, json: bool) -> crate::Result<()> {
    if json {
        let summary = ResolveSummary {
            driver_version: metadata.driver_version(),
            default_k8s_version: metadata.default_k8s_version(),
            k8s_versions: metadata.k8s_versions().keys().map(String::as_str).collect(),
            current_versions: metadata.current_versions(),
            excluded_versions: metadata.excluded_versions().iter().map(String::as_str).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Kubernetes versions for driver".bright_blue().bold(),
        metadata.driver_version().bold()
    );

    for version in metadata.k8s_versions().keys() {
        let mut tags = Vec::new();
        if metadata.default_k8s_version() == Some(version.as_str()) {
            tags.push("default".green().to_string());
        }
        if metadata.current_versions().values().any(|v| v == version) {
            tags.push("current".cyan().to_string());
        }
        if tags.is_empty() {
            println!("├── {}", version);
        } else {
            println!("├── {} [{}]", version, tags.join(", "));
        }
    }

    if !metadata.excluded_versions().is_empty() {
        println!("\n{}", "Not supported by this driver:".yellow());
        for version in metadata.excluded_versions() {
            println!("├── {}", version.dimmed());
        }
    }

    Ok(())
}

pub fn handle_current(metadata: &Metadata, json: bool) -> crate::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(metadata.current_versions())?);
        return Ok(());
    }

    for (bucket, version) in metadata.current_versions() {
        println!("{:<8} {}", bucket.bold(), version);
    }
    Ok(())
}

pub fn handle_images(metadata: &Metadata, k8s_version: &str, json: bool) -> crate::Result<()> {
    let artifacts: &ArtifactSet = metadata.artifacts_for(k8s_version).ok_or_else(|| {
        MetadataError::NotFound(format!(
            "Kubernetes version {} for driver {}",
            k8s_version,
            metadata.driver_version()
        ))
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(artifacts)?);
    } else {
        print!("{}", serde_yaml::to_string(artifacts)?);
    }
    Ok(())
}
