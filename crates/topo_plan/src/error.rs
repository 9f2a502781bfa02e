//! Error types for the plan crate.

use std::path::PathBuf;

use thiserror::Error;

use topo_graph::GraphError;

/// Result type alias for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors that can occur during plan emission or serialization.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("plan not found at path: {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
