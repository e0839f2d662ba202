//! Rendered child resources as a tagged sum type
//!
//! The translators scan heterogeneous rendered children. Modeling the
//! variants as an enum keeps handling exhaustive and compile-checked: adding
//! a variant forces every scan site to decide how it participates.

use trellis_common::meta::HasTypeMeta;
use trellis_common::{Error, Result};

use crate::bundle::ApplicationBundle;
use crate::k8s::{Deployment, Service};
use crate::payload::RawPayload;

/// A rendered document the translators do not recognize.
///
/// Carries the kind tag and the exact rendered bytes, frozen at the decode
/// boundary. Opaque children never satisfy the port-search predicate but
/// still wrap and propagate without loss.
#[derive(Clone, Debug, PartialEq)]
pub struct OpaqueObject {
    kind: String,
    raw: RawPayload,
}

impl OpaqueObject {
    /// Freeze an unrecognized rendered document
    pub fn new(kind: impl Into<String>, raw: Vec<u8>) -> Self {
        Self {
            kind: kind.into(),
            raw: RawPayload::from_bytes(raw),
        }
    }

    /// Kind tag carried by the document
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The frozen rendered bytes
    pub fn raw(&self) -> &RawPayload {
        &self.raw
    }
}

/// A polymorphic rendered resource produced for one workload
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedObject {
    /// Workload descriptor with containers and ports
    Deployment(Deployment),
    /// Network descriptor
    Service(Service),
    /// Aggregate produced by the bundling stage
    Bundle(ApplicationBundle),
    /// Unrecognized document, passed through untouched
    Opaque(OpaqueObject),
}

impl RenderedObject {
    /// Resource kind tag
    pub fn kind(&self) -> &str {
        match self {
            RenderedObject::Deployment(_) => Deployment::KIND,
            RenderedObject::Service(_) => Service::KIND,
            RenderedObject::Bundle(_) => ApplicationBundle::KIND,
            RenderedObject::Opaque(o) => o.kind(),
        }
    }

    /// Exact serialized bytes of this object.
    ///
    /// Typed variants serialize through serde with deterministic field
    /// ordering; opaque variants return the bytes frozen at decode time.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = match self {
            RenderedObject::Deployment(d) => serde_json::to_vec(d),
            RenderedObject::Service(s) => serde_json::to_vec(s),
            RenderedObject::Bundle(b) => serde_json::to_vec(b),
            RenderedObject::Opaque(o) => return Ok(o.raw().as_bytes().to_vec()),
        };
        bytes.map_err(|e| Error::serialization_for_kind(self.kind(), e.to_string()))
    }

    /// The deployment behind this object, if it is one
    pub fn as_deployment(&self) -> Option<&Deployment> {
        match self {
            RenderedObject::Deployment(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_follow_the_variant() {
        assert_eq!(
            RenderedObject::Deployment(Deployment::new("a")).kind(),
            "Deployment"
        );
        assert_eq!(RenderedObject::Service(Service::new("a")).kind(), "Service");
        assert_eq!(
            RenderedObject::Bundle(ApplicationBundle::new("a")).kind(),
            "ApplicationBundle"
        );
        assert_eq!(
            RenderedObject::Opaque(OpaqueObject::new("CronJob", b"{}".to_vec())).kind(),
            "CronJob"
        );
    }

    #[test]
    fn typed_bytes_match_direct_serialization() {
        let deployment = Deployment::new("app");
        let expected = serde_json::to_vec(&deployment).unwrap();
        let object = RenderedObject::Deployment(deployment);
        assert_eq!(object.to_bytes().unwrap(), expected);
    }

    #[test]
    fn opaque_bytes_are_returned_verbatim() {
        let raw = br#"{"kind":"CronJob","spec":{"schedule":"* * * * *"}}"#.to_vec();
        let object = RenderedObject::Opaque(OpaqueObject::new("CronJob", raw.clone()));
        assert_eq!(object.to_bytes().unwrap(), raw);
    }

    #[test]
    fn as_deployment_filters_variants() {
        assert!(RenderedObject::Deployment(Deployment::new("a"))
            .as_deployment()
            .is_some());
        assert!(RenderedObject::Service(Service::new("a"))
            .as_deployment()
            .is_none());
    }
}
