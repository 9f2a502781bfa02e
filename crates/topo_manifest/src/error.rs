//! Error types for the manifest crate.

use std::path::PathBuf;

use thiserror::Error;

use topo_secrets::SecretError;

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors that can occur while reading manifests.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found at path: {0}")]
    NotFound(PathBuf),

    #[error("manifest already exists at path: {0}")]
    AlreadyExists(PathBuf),

    #[error("no manifest files under directory: {0}")]
    EmptyDirectory(PathBuf),

    #[error("invalid manifest in {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("unsupported manifest version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("secret error: {0}")]
    Secret(#[from] SecretError),
}
