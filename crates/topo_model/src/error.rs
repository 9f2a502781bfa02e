//! Error types for the model crate.

use thiserror::Error;

use crate::id::ResourceId;

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Shape errors raised when a resource declaration fails its kind schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid resource identifier '{0}' (expected lowercase letters, digits and dashes, starting with a letter, at most 64 characters)")]
    InvalidIdentifier(String),

    #[error("resource '{resource}': invalid CIDR block '{cidr}'")]
    InvalidCidr { resource: ResourceId, cidr: String },

    #[error("resource '{resource}': invalid attribute '{attribute}': {message}")]
    InvalidAttribute {
        resource: ResourceId,
        attribute: &'static str,
        message: String,
    },
}
