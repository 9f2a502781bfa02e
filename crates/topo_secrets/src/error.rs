//! Error types for the secrets crate.

use thiserror::Error;

/// Result type alias for secret operations.
pub type SecretResult<T> = Result<T, SecretError>;

/// Errors that can occur during secret lookup.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    SecretNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
