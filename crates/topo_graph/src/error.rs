//! Error types for the graph crate.

use std::fmt;

use thiserror::Error;

use topo_model::{ModelError, ResourceId};

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// The node sequence of a detected cycle, first node repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclePath(pub Vec<ResourceId>);

impl fmt::Display for CyclePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.0 {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", id)?;
            first = false;
        }
        Ok(())
    }
}

/// Structural errors raised during registration, resolution or ordering.
///
/// All of these are fatal to the current build: no plan is emitted once one
/// occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("duplicate resource identifier: {0}")]
    DuplicateIdentifier(ResourceId),

    #[error("resource not found: {0}")]
    NotFound(ResourceId),

    #[error("dangling reference: '{from}.{attribute}' names unknown resource '{target}'")]
    DanglingReference {
        from: ResourceId,
        attribute: &'static str,
        target: ResourceId,
    },

    #[error("dependency cycle detected: {0}")]
    CycleDetected(CyclePath),

    #[error(transparent)]
    Shape(#[from] ModelError),
}
