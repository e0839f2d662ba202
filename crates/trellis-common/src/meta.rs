//! Canonical Kubernetes-style metadata for translated resources
//!
//! Every resource the translators construct or snapshot uses this unified
//! metadata representation. Serialization is deterministic: struct fields
//! emit in declaration order and label maps are `BTreeMap`, so re-serializing
//! the same value always yields identical bytes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Standard Kubernetes ObjectMeta for translated resources.
///
/// Namespace is optional: aggregate resources and injected services are
/// placed by the surrounding system, so the translators leave it unset
/// unless the rendered child carried one.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name
    pub name: String,
    /// Resource namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Create new metadata with the given name and nothing else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    /// Set the namespace
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add an annotation
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

/// Trait for types that have a known API version and kind.
///
/// Implement this for resource types so apiVersion/kind strings are defined
/// once, keeping constructors and serialized output consistent.
///
/// # Example
/// ```ignore
/// impl HasTypeMeta for Service {
///     const API_VERSION: &'static str = "v1";
///     const KIND: &'static str = "Service";
/// }
/// ```
pub trait HasTypeMeta {
    /// Full API version (e.g., "apps/v1", "v1")
    const API_VERSION: &'static str;
    /// Resource kind (e.g., "Deployment")
    const KIND: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_builder_chains() {
        let meta = ObjectMeta::new("my-app")
            .in_namespace("prod")
            .with_label("app", "my-app")
            .with_annotation("team", "payments");

        assert_eq!(meta.name, "my-app");
        assert_eq!(meta.namespace.as_deref(), Some("prod"));
        assert_eq!(meta.labels.get("app"), Some(&"my-app".to_string()));
        assert_eq!(meta.annotations.get("team"), Some(&"payments".to_string()));
    }

    #[test]
    fn empty_collections_are_skipped_in_json() {
        let meta = ObjectMeta::new("my-app");
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"name":"my-app"}"#);
    }

    #[test]
    fn labels_serialize_in_sorted_key_order() {
        let meta = ObjectMeta::new("m")
            .with_label("zzz", "1")
            .with_label("aaa", "2");
        let json = serde_json::to_string(&meta).unwrap();
        let zzz = json.find("zzz").unwrap();
        let aaa = json.find("aaa").unwrap();
        assert!(aaa < zzz);
    }
}
