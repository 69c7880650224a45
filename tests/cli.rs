use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// kdm-ctl isolated from any user or project config.
fn kdm_ctl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kdm-ctl").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("KDM_DRIVER_VERSION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_current_lists_minor_versions() {
    let home = TempDir::new().unwrap();
    kdm_ctl(&home)
        .args(["--driver-version", "v0.3.1", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v1.16.2-rancher1-1"))
        .stdout(predicate::str::contains("v1.15.5-rancher1-1"));
}

#[test]
fn test_resolve_json_reports_exclusions() {
    let home = TempDir::new().unwrap();
    let output = kdm_ctl(&home)
        .args(["--driver-version", "v0.3.0", "resolve", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["defaultK8sVersion"], "v1.15.5-rancher1-1");
    let excluded: Vec<&str> = summary["excludedVersions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(excluded.contains(&"v1.16.2-rancher1-1"));
}

#[test]
fn test_driver_version_from_env() {
    let home = TempDir::new().unwrap();
    kdm_ctl(&home)
        .env("KDM_DRIVER_VERSION", "v0.2.8")
        .args(["images", "v1.13.10-rancher1-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rancher/hyperkube:v1.13.10-rancher1"));
}

#[test]
fn test_images_for_unsupported_version_fails() {
    let home = TempDir::new().unwrap();
    kdm_ctl(&home)
        .args(["--driver-version", "v0.3.0", "images", "v1.16.2-rancher1-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_template_renders_with_values_file() {
    let home = TempDir::new().unwrap();
    let values = home.path().join("values.yaml");
    fs::write(&values, "cluster_cidr: 10.88.0.0/16\nnode_selector:\n  role: worker\n").unwrap();

    kdm_ctl(&home)
        .args(["template", "flannel", "v1.15.5-rancher1-1", "--values"])
        .arg(&values)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Network\": \"10.88.0.0/16\""))
        .stdout(predicate::str::contains("role: worker"));
}

#[test]
fn test_inconsistent_catalog_is_fatal() {
    let home = TempDir::new().unwrap();
    let catalog = home.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"{
            "k8sVersionSystemImages": {
                "v1.15.5-rancher1-1": {"kubernetes": "rancher/hyperkube:v1.14.8-rancher1"}
            }
        }"#,
    )
    .unwrap();

    kdm_ctl(&home)
        .arg("--catalog")
        .arg(&catalog)
        .arg("current")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fatal"));
}

#[test]
fn test_config_file_enables_snapshot() {
    let home = TempDir::new().unwrap();
    let data_file = home.path().join("out").join("data.json");
    fs::write(
        home.path().join(".kdm.toml"),
        format!(
            "driver_version = \"v0.2.8\"\n\n[output]\nwrite_data = true\ndata_file = {:?}\n",
            data_file.to_string_lossy()
        ),
    )
    .unwrap();

    kdm_ctl(&home).arg("current").assert().success();

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&data_file).unwrap()).unwrap();
    assert_eq!(snapshot["driverVersion"], "v0.2.8");
    assert_eq!(snapshot["defaultK8sVersion"], "v1.14.8-rancher1-1");
}

#[test]
fn test_config_image_repo_mirrors_embedded_catalog() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join(".kdm.toml"),
        "[catalog]\nkubernetes_image_repo = \"registry.local/rancher/hyperkube\"\n",
    )
    .unwrap();

    kdm_ctl(&home)
        .args(["images", "v1.15.5-rancher1-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "kubernetes: registry.local/rancher/hyperkube:v1.15.5-rancher1",
        ));
}

#[test]
fn test_template_with_empty_values_file() {
    let home = TempDir::new().unwrap();
    let values = home.path().join("values.yaml");
    fs::write(&values, "").unwrap();

    kdm_ctl(&home)
        .args(["template", "flannel", "v1.15.5-rancher1-1", "--values"])
        .arg(&values)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Network\": \"10.42.0.0/16\""));
}
