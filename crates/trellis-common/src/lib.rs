//! Common types for Trellis: errors, resource metadata, and correlation labels

#![deny(missing_docs)]

pub mod error;
pub mod meta;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Default label key correlating generated resources back to their owning workload.
///
/// The value is always the workload's unique identifier. The selector/watch
/// machinery uses this pair to re-associate generated resources with the
/// workload across reconciliation passes. Translators accept an alternative
/// key so independent translator configurations can coexist.
pub const WORKLOAD_UID_LABEL: &str = "trellis.io/workload-uid";
