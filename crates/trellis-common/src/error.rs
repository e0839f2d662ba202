//! Error types for Trellis translation
//!
//! Errors are structured with fields to aid debugging in production.
//! Each variant includes contextual information like the owning workload
//! and the resource kind being processed.

use thiserror::Error;

/// Default context value when no specific context is available
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Main error type for Trellis translation operations
#[derive(Debug, Error)]
pub enum Error {
    /// A rendered child could not be captured as an exact byte payload
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The resource kind being serialized (if known)
        kind: Option<String>,
    },

    /// A selected element does not conform to the expected shape
    #[error("structural error for {workload}: {message}")]
    Structural {
        /// Name of the workload whose children were being translated
        workload: String,
        /// Description of the contract violation
        message: String,
    },

    /// Validation error for workload identity or translator configuration
    #[error("validation error for {workload}: {message}")]
    Validation {
        /// Name of the workload with invalid configuration
        workload: String,
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "metadata.uid")
        field: Option<String>,
    },
}

impl Error {
    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: None,
        }
    }

    /// Create a serialization error with resource kind context
    pub fn serialization_for_kind(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Create a structural error with the given message
    ///
    /// For contract violations detected without workload context.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural {
            workload: UNKNOWN_CONTEXT.to_string(),
            message: msg.into(),
        }
    }

    /// Create a structural error with workload context
    pub fn structural_for(workload: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Structural {
            workload: workload.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            workload: UNKNOWN_CONTEXT.to_string(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with workload context
    pub fn validation_for(workload: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            workload: workload.into(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with workload context and field path
    pub fn validation_for_field(
        workload: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation {
            workload: workload.into(),
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Check if this error is retryable
    ///
    /// Every translation error reports a problem with the inputs, not a
    /// transient condition: re-invoking the pure translators with the same
    /// inputs yields the same failure. Callers must fix the rendered
    /// children or the workload configuration.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Serialization { .. } => false,
            Error::Structural { .. } => false,
            Error::Validation { .. } => false,
        }
    }

    /// Get the workload name if this error is associated with a specific workload
    pub fn workload(&self) -> Option<&str> {
        match self {
            Error::Serialization { .. } => None,
            Error::Structural { workload, .. } => Some(workload),
            Error::Validation { workload, .. } => Some(workload),
        }
    }

    /// Get the resource kind if this error has one
    pub fn kind(&self) -> Option<&str> {
        match self {
            Error::Serialization { kind, .. } => kind.as_deref(),
            _ => None,
        }
    }
}
