//! Network plugin templates compiled into the crate.

use std::collections::BTreeMap;

use super::registry::DEFAULT_TEMPLATE_KEY;

pub const CALICO: &str = "calico";
pub const CANAL: &str = "canal";
pub const FLANNEL: &str = "flannel";

/// Families every registry must provide.
pub const REQUIRED_FAMILIES: &[&str] = &[CALICO, CANAL, FLANNEL];

const CALICO_V1_15: &str = include_str!("builtin/calico_v1_15.yaml.tera");
const CALICO_V1_13: &str = include_str!("builtin/calico_v1_13.yaml.tera");
const CALICO_DEFAULT: &str = include_str!("builtin/calico_default.yaml.tera");

const CANAL_V1_15: &str = include_str!("builtin/canal_v1_15.yaml.tera");
const CANAL_V1_13: &str = include_str!("builtin/canal_v1_13.yaml.tera");
const CANAL_DEFAULT: &str = include_str!("builtin/canal_default.yaml.tera");

const FLANNEL_V1_15: &str = include_str!("builtin/flannel_v1_15.yaml.tera");
const FLANNEL_DEFAULT: &str = include_str!("builtin/flannel_default.yaml.tera");

fn family(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(bucket, text)| (bucket.to_string(), text.to_string()))
        .collect()
}

/// Built-in families keyed by name, then by minor bucket.
///
/// v1.13 and v1.14 share a template; older versions use `default`.
pub fn builtin_families() -> BTreeMap<String, BTreeMap<String, String>> {
    let mut families = BTreeMap::new();
    families.insert(
        CALICO.to_string(),
        family(&[
            ("v1.15", CALICO_V1_15),
            ("v1.14", CALICO_V1_13),
            ("v1.13", CALICO_V1_13),
            (DEFAULT_TEMPLATE_KEY, CALICO_DEFAULT),
        ]),
    );
    families.insert(
        CANAL.to_string(),
        family(&[
            ("v1.15", CANAL_V1_15),
            ("v1.14", CANAL_V1_13),
            ("v1.13", CANAL_V1_13),
            (DEFAULT_TEMPLATE_KEY, CANAL_DEFAULT),
        ]),
    );
    families.insert(
        FLANNEL.to_string(),
        family(&[("v1.15", FLANNEL_V1_15), (DEFAULT_TEMPLATE_KEY, FLANNEL_DEFAULT)]),
    );
    families
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::registry::TemplateRegistry;

    #[test]
    fn test_builtin_families_pass_validation() {
        let registry = TemplateRegistry::new(builtin_families(), REQUIRED_FAMILIES).unwrap();
        assert_eq!(registry.family_names(), vec!["calico", "canal", "flannel"]);
    }

    #[test]
    fn test_v1_13_and_v1_14_share_calico_template() {
        let registry = TemplateRegistry::new(builtin_families(), REQUIRED_FAMILIES).unwrap();
        assert_eq!(
            registry.select(CALICO, "v1.13.12-rancher1-1"),
            registry.select(CALICO, "v1.14.8-rancher1-1")
        );
        assert_ne!(
            registry.select(CALICO, "v1.14.8-rancher1-1"),
            registry.select(CALICO, "v1.15.5-rancher1-1")
        );
    }

    #[test]
    fn test_flannel_falls_back_for_v1_16() {
        let registry = TemplateRegistry::new(builtin_families(), REQUIRED_FAMILIES).unwrap();
        assert_eq!(registry.select(FLANNEL, "v1.16.2-rancher1-1"), Some(FLANNEL_DEFAULT));
        assert!(FLANNEL_DEFAULT.contains("extensions/v1beta1"));
    }
}
