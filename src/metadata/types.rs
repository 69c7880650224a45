use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::compat::VersionRange;

/// Container images deployed for one Kubernetes version.
///
/// Only `kubernetes` is read by the resolver; the rest is carried through
/// untouched for consumers and templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemImages {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub etcd: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alpine: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nginx_proxy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cert_downloader: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kubernetes_services_sidecar: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kube_dns: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dnsmasq: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kube_dns_sidecar: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kube_dns_autoscaler: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub core_dns: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub core_dns_autoscaler: String,
    /// Hyperkube image; its tag must be a prefix of the version key.
    pub kubernetes: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flannel: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flannel_cni: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub calico_node: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub calico_cni: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub calico_controllers: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub canal_node: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub canal_cni: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub canal_flannel: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pod_infra_container: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ingress: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ingress_backend: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metrics_server: String,
}

/// Extra arguments for each Kubernetes service of one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOptions {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub kube_api: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub kube_controller: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub kubelet: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub kubeproxy: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scheduler: BTreeMap<String, String>,
}

/// Binaries and images installed on Windows worker nodes of one version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsSystemImages {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nginx_proxy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cert_downloader: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kubernetes_binaries_package: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flannel_cni_binaries: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub calico_cni_binaries: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub canal_cni_binaries: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kubelet_pause: String,
}

/// Everything resolved for one Kubernetes version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSet {
    pub system_images: SystemImages,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_options: Option<ServiceOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows_system_images: Option<WindowsSystemImages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows_service_options: Option<ServiceOptions>,
}

/// Min/max management server versions a Kubernetes version ships with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RancherVersionRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_version: Option<String>,
}

/// Images of the cluster tools (alerting, pipelines, logging, auth), keyed by component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsSystemImages {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alert_system_images: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pipeline_system_images: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub logging_system_images: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub auth_system_images: BTreeMap<String, String>,
}

impl ToolsSystemImages {
    pub fn is_empty(&self) -> bool {
        self.alert_system_images.is_empty()
            && self.pipeline_system_images.is_empty()
            && self.logging_system_images.is_empty()
            && self.auth_system_images.is_empty()
    }
}

/// The catalog as supplied by the data source, before any filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalog {
    /// Image repository the Kubernetes image of every entry must come from.
    #[serde(default = "default_kubernetes_image_repo")]
    pub kubernetes_image_repo: String,

    /// System images per Kubernetes version.
    #[serde(default)]
    pub k8s_version_system_images: BTreeMap<String, SystemImages>,

    /// Service options per Kubernetes version.
    #[serde(default)]
    pub k8s_version_service_options: BTreeMap<String, ServiceOptions>,

    /// Min/max driver versions per Kubernetes version.
    #[serde(default)]
    pub k8s_version_driver_versions: BTreeMap<String, VersionRange>,

    /// Default Kubernetes version for every driver version; `default` is the fallback key.
    #[serde(default)]
    pub driver_default_k8s_versions: BTreeMap<String, String>,

    /// Add-on templates per family and minor bucket, merged over the built-ins.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub k8s_versioned_templates: BTreeMap<String, BTreeMap<String, String>>,

    /// Windows worker artifacts per Kubernetes version; never filtered on their own.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub k8s_version_windows_system_images: BTreeMap<String, WindowsSystemImages>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub k8s_version_windows_service_options: BTreeMap<String, ServiceOptions>,

    /// Management server versions per Kubernetes version. Carried, not enforced.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub k8s_version_rancher_versions: BTreeMap<String, RancherVersionRange>,

    /// Default Kubernetes version per management server version.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rancher_default_k8s_versions: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "ToolsSystemImages::is_empty")]
    pub tools_system_images: ToolsSystemImages,
}

pub const DEFAULT_KUBERNETES_IMAGE_REPO: &str = "rancher/hyperkube";

fn default_kubernetes_image_repo() -> String {
    DEFAULT_KUBERNETES_IMAGE_REPO.to_string()
}

impl RawCatalog {
    /// Empty catalog using the default image repository.
    pub fn new() -> Self {
        Self {
            kubernetes_image_repo: default_kubernetes_image_repo(),
            ..Default::default()
        }
    }

    /// Move every Kubernetes image from the current repository to `repo`.
    ///
    /// Images that do not come from the current repository are left alone,
    /// so validation still reports them.
    pub fn mirror_kubernetes_images(&mut self, repo: &str) {
        if repo == self.kubernetes_image_repo {
            return;
        }

        let old_prefix = format!("{}:", self.kubernetes_image_repo);
        for (k8s_version, images) in self.k8s_version_system_images.iter_mut() {
            match images.kubernetes.strip_prefix(&old_prefix) {
                Some(tag) => images.kubernetes = format!("{}:{}", repo, tag),
                None => log::warn!(
                    "Kubernetes image {} of {} is not from {}, leaving it as is",
                    images.kubernetes,
                    k8s_version,
                    self.kubernetes_image_repo
                ),
            }
        }

        log::debug!("Kubernetes images mirrored from {} to {}", self.kubernetes_image_repo, repo);
        self.kubernetes_image_repo = repo.to_string();
    }
}
