//! Identity of the workload that owns a set of rendered children

use std::collections::BTreeMap;

use crate::k8s::LabelSelector;

/// The logical owner of a set of rendered children.
///
/// Read-only for the duration of a translation call. The unique identifier
/// is the value of the correlation label placed on every generated child so
/// the selector/watch machinery can re-associate them with this workload.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkloadIdentity {
    name: String,
    namespace: String,
    uid: String,
}

impl WorkloadIdentity {
    /// Create a new workload identity
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            uid: uid.into(),
        }
    }

    /// Workload name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Workload namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Stable unique identifier
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Correlation labels for generated children: `{label_key: uid}`
    pub fn correlation_labels(&self, label_key: &str) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        labels.insert(label_key.to_string(), self.uid.clone());
        labels
    }

    /// Label selector matching the correlation labels
    pub fn selector(&self, label_key: &str) -> LabelSelector {
        LabelSelector {
            match_labels: self.correlation_labels(label_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_common::WORKLOAD_UID_LABEL;

    #[test]
    fn correlation_labels_carry_the_uid() {
        let w = WorkloadIdentity::new("test-workload", "test-namespace", "a-very-unique-identifier");

        let labels = w.correlation_labels(WORKLOAD_UID_LABEL);
        assert_eq!(labels.len(), 1);
        assert_eq!(
            labels.get(WORKLOAD_UID_LABEL),
            Some(&"a-very-unique-identifier".to_string())
        );
    }

    #[test]
    fn selector_matches_correlation_labels() {
        let w = WorkloadIdentity::new("w", "ns", "uid-1234");
        let selector = w.selector("example.io/owner");
        assert_eq!(selector.match_labels, w.correlation_labels("example.io/owner"));
    }
}
