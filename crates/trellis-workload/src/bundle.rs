//! Distributable aggregate wrapping a workload's rendered children
//!
//! An `ApplicationBundle` packages every rendered child as a named template
//! entry so the surrounding system can ship the whole set as one resource.
//! Each template holds a frozen snapshot of the child, not a live reference.

use serde::{Deserialize, Serialize};
use trellis_common::meta::{HasTypeMeta, ObjectMeta};

use crate::k8s::LabelSelector;
use crate::payload::RawPayload;

/// Aggregate resource holding one template per rendered child
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationBundle {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: ApplicationBundleSpec,
}

impl HasTypeMeta for ApplicationBundle {
    const API_VERSION: &'static str = "workload.trellis.io/v1alpha1";
    const KIND: &'static str = "ApplicationBundle";
}

impl ApplicationBundle {
    /// Create an empty bundle
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            api_version: Self::API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata: ObjectMeta::new(name),
            spec: ApplicationBundleSpec::default(),
        }
    }
}

/// Bundle spec
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationBundleSpec {
    /// Selector matching the resources this bundle owns
    pub resource_selector: LabelSelector,
    /// Templates, one per rendered child, in input order
    pub resource_templates: Vec<ResourceTemplate>,
}

/// One bundled child: derived name, propagated labels, frozen payload
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    /// Metadata (derived name, correlation labels)
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: ResourceTemplateSpec,
}

/// Template spec carrying the frozen child
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplateSpec {
    /// Exact serialized bytes of the child, captured at construction
    pub template: RawPayload,
}
