//! Workload translation core for Trellis
//!
//! This crate turns the rendered children of one logical workload into their
//! distributable form:
//!
//! - **AppBundler**: packages every child as a named template entry inside
//!   one [`ApplicationBundle`], freezing each child's exact serialized bytes
//! - **ServiceInjector**: scans the children for the first exposable
//!   container port and appends a load-balanced Service for it
//! - **TranslationPipeline**: applies a configurable ordered chain of stages
//!
//! Both stages are pure and deterministic; the surrounding reconciler owns
//! retrieval, persistence, and deciding when to run.

pub mod bundle;
pub mod identity;
pub mod k8s;
pub mod payload;
pub mod rendered;
pub mod translate;

pub use bundle::{ApplicationBundle, ResourceTemplate};
pub use identity::WorkloadIdentity;
pub use payload::RawPayload;
pub use rendered::{OpaqueObject, RenderedObject};
pub use translate::{AppBundler, ServiceInjector, Translate, TranslationPipeline};

pub use trellis_common::{Error, Result, WORKLOAD_UID_LABEL};
