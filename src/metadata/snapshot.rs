//! One-shot export of resolved metadata for external tooling.

use std::fs;
use std::path::Path;

use super::Metadata;
use crate::error::Result;

/// Default location of the exported snapshot.
pub const DEFAULT_DATA_FILE: &str = "./data/data.json";

/// Serialize `metadata` as pretty JSON.
pub fn to_json(metadata: &Metadata) -> Result<String> {
    Ok(serde_json::to_string_pretty(metadata)?)
}

/// Write the snapshot to `path`, creating parent directories.
pub fn write_snapshot(path: &Path, metadata: &Metadata) -> Result<()> {
    let content = to_json(metadata)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    log::info!("Wrote metadata snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::embedded_catalog;

    #[test]
    fn test_write_snapshot_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("data.json");
        let metadata = Metadata::build(&embedded_catalog().unwrap(), "v0.3.0").unwrap();

        write_snapshot(&path, &metadata).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["driverVersion"], "v0.3.0");
        assert_eq!(written["defaultK8sVersion"], "v1.15.5-rancher1-1");
        assert_eq!(written["currentVersions"]["v1.15"], "v1.15.5-rancher1-1");
        assert!(written["k8sVersions"]["v1.15.5-rancher1-1"]["systemImages"]["kubernetes"].is_string());
        assert!(written["templates"]["calico"]["default"].is_string());
        assert!(written.get("excludedVersions").is_none());
        assert_eq!(
            written["k8sVersionDriverVersions"]["v1.16.2-rancher1-1"]["minDriverVersion"],
            "v0.3.1"
        );
        assert_eq!(written["driverDefaultK8sVersions"]["default"], "v1.15.5-rancher1-1");
    }

    #[test]
    fn test_snapshot_keeps_catalog_tables() {
        let catalog = r#"
k8sVersionSystemImages:
  v1.13.10-rancher1-2:
    kubernetes: rancher/hyperkube:v1.13.10-rancher1
  v1.15.5-rancher1-1:
    kubernetes: rancher/hyperkube:v1.15.5-rancher1
k8sVersionWindowsSystemImages:
  v1.15.5-rancher1-1:
    kubernetesBinariesPackage: rancher/hyperkube:v1.15.5-rancher1
    kubeletPause: rancher/kubelet-pause:v0.1.3
k8sVersionWindowsServiceOptions:
  v1.15.5-rancher1-1:
    kubelet:
      image-pull-progress-deadline: 20m
k8sVersionDriverVersions:
  v1.13.10-rancher1-2:
    maxDriverVersion: v0.2.8
k8sVersionRancherVersions:
  v1.15.5-rancher1-1:
    minVersion: 2.3.0
driverDefaultK8sVersions:
  default: v1.15.5-rancher1-1
rancherDefaultK8sVersions:
  "2.3": v1.15.x
toolsSystemImages:
  loggingSystemImages:
    fluentd: rancher/fluentd:v0.1.11
"#;
        let catalog = crate::metadata::catalog::parse_catalog(
            catalog,
            crate::metadata::catalog::CatalogFormat::Yaml,
        )
        .unwrap();
        let metadata = Metadata::build(&catalog, "v0.3.0").unwrap();
        let written: serde_json::Value = serde_json::from_str(&to_json(&metadata).unwrap()).unwrap();

        let artifacts = &written["k8sVersions"]["v1.15.5-rancher1-1"];
        assert_eq!(artifacts["windowsSystemImages"]["kubeletPause"], "rancher/kubelet-pause:v0.1.3");
        assert_eq!(
            artifacts["windowsServiceOptions"]["kubelet"]["image-pull-progress-deadline"],
            "20m"
        );
        assert!(written["k8sVersions"].get("v1.13.10-rancher1-2").is_none());
        assert_eq!(
            written["k8sVersionDriverVersions"]["v1.13.10-rancher1-2"]["maxDriverVersion"],
            "v0.2.8"
        );
        assert_eq!(written["driverDefaultK8sVersions"]["default"], "v1.15.5-rancher1-1");
        assert_eq!(written["k8sVersionRancherVersions"]["v1.15.5-rancher1-1"]["minVersion"], "2.3.0");
        assert_eq!(written["rancherDefaultK8sVersions"]["2.3"], "v1.15.x");
        assert_eq!(
            written["toolsSystemImages"]["loggingSystemImages"]["fluentd"],
            "rancher/fluentd:v0.1.11"
        );
    }
}
