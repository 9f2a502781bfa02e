//! Declaration-ordered resource registry.

use std::collections::HashMap;

use tracing::debug;

use topo_model::{ResourceId, ResourceNode};

use crate::error::{GraphError, GraphResult};

/// The registry of declared resources for one build.
///
/// Declaration order is preserved: iteration yields nodes in the order they
/// were registered, which is the tie-break used when the dependency graph
/// imposes no constraint between two nodes.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    order: Vec<ResourceId>,
    nodes: HashMap<ResourceId, ResourceNode>,
}

impl ResourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            nodes: HashMap::new(),
        }
    }

    /// Register a declared resource.
    ///
    /// The node is shape-checked against its kind schema before it is
    /// admitted. Registering an identifier twice fails with
    /// [`GraphError::DuplicateIdentifier`] regardless of declaration order.
    pub fn register(&mut self, node: ResourceNode) -> GraphResult<()> {
        node.validate_shape()?;

        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateIdentifier(node.id.clone()));
        }

        debug!("Registering {} '{}'", node.kind(), node.id);
        self.order.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Get a node by identifier, failing with [`GraphError::NotFound`].
    pub fn get(&self, id: &ResourceId) -> GraphResult<&ResourceNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NotFound(id.clone()))
    }

    /// Get a node by identifier if present.
    pub fn lookup(&self, id: &ResourceId) -> Option<&ResourceNode> {
        self.nodes.get(id)
    }

    /// Check whether an identifier is registered.
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Position of an identifier in declaration order.
    pub fn position(&self, id: &ResourceId) -> Option<usize> {
        self.order.iter().position(|other| other == id)
    }

    /// Iterate nodes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Identifiers in declaration order.
    pub fn ids(&self) -> &[ResourceId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
