//! Dependency graph and topological ordering.

use std::collections::HashMap;

use tracing::debug;

use topo_model::{Reference, ResourceId};

use crate::error::{CyclePath, GraphError, GraphResult};
use crate::registry::ResourceRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Directed graph over registered resources.
///
/// An edge `from -> to` means `from` references `to`, so `to` must be created
/// first. Orderings are deterministic: nodes with no constraint between them
/// keep their registration order.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: Vec<ResourceId>,
    index: HashMap<ResourceId, usize>,
    deps: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Build a graph with one node per registered resource and no edges.
    pub fn from_registry(registry: &ResourceRegistry) -> Self {
        let nodes: Vec<ResourceId> = registry.ids().to_vec();
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let deps = vec![Vec::new(); nodes.len()];
        Self { nodes, index, deps }
    }

    /// Add a dependency edge: `from` references `to`.
    pub fn add_edge(&mut self, from: &ResourceId, to: &ResourceId) -> GraphResult<()> {
        let from_ix = self.index_of(from)?;
        let to_ix = self.index_of(to)?;
        if !self.deps[from_ix].contains(&to_ix) {
            self.deps[from_ix].push(to_ix);
        }
        Ok(())
    }

    /// Add one edge per resolved reference.
    pub fn add_references(&mut self, references: &[Reference]) -> GraphResult<()> {
        for reference in references {
            self.add_edge(&reference.from, &reference.to)?;
        }
        debug!(
            "Dependency graph: {} nodes, {} edges",
            self.nodes.len(),
            self.deps.iter().map(|d| d.len()).sum::<usize>()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Identifiers a node depends on, in edge insertion order.
    pub fn dependencies_of(&self, id: &ResourceId) -> GraphResult<Vec<ResourceId>> {
        let ix = self.index_of(id)?;
        Ok(self.deps[ix]
            .iter()
            .map(|&dep| self.nodes[dep].clone())
            .collect())
    }

    /// Compute a creation order: every node appears after all nodes it
    /// references.
    ///
    /// Depth-first traversal with three-color marking; a back-edge to an
    /// in-progress node is a cycle and fails with
    /// [`GraphError::CycleDetected`] carrying the full cycle path. Nodes with
    /// no constraint between them come out in registration order, so the
    /// order is stable across runs with identical input.
    pub fn topological_order(&self) -> GraphResult<Vec<ResourceId>> {
        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut path = Vec::new();
        let mut order = Vec::with_capacity(self.nodes.len());

        // Dependency lists are walked in ascending registration order for a
        // deterministic result.
        let mut sorted_deps = self.deps.clone();
        for deps in &mut sorted_deps {
            deps.sort_unstable();
        }

        for start in 0..self.nodes.len() {
            if marks[start] == Mark::Unvisited {
                self.visit(start, &sorted_deps, &mut marks, &mut path, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit(
        &self,
        node: usize,
        deps: &[Vec<usize>],
        marks: &mut [Mark],
        path: &mut Vec<usize>,
        order: &mut Vec<ResourceId>,
    ) -> GraphResult<()> {
        marks[node] = Mark::InProgress;
        path.push(node);

        for &dep in &deps[node] {
            match marks[dep] {
                Mark::Done => {}
                Mark::Unvisited => self.visit(dep, deps, marks, path, order)?,
                Mark::InProgress => {
                    return Err(GraphError::CycleDetected(self.cycle_path(path, dep)));
                }
            }
        }

        path.pop();
        marks[node] = Mark::Done;
        order.push(self.nodes[node].clone());
        Ok(())
    }

    /// The back-edge target and everything after it on the current path, with
    /// the target repeated to close the loop.
    fn cycle_path(&self, path: &[usize], back_edge_target: usize) -> CyclePath {
        let start = path
            .iter()
            .position(|&node| node == back_edge_target)
            .unwrap_or(0);
        let mut ids: Vec<ResourceId> = path[start..]
            .iter()
            .map(|&node| self.nodes[node].clone())
            .collect();
        ids.push(self.nodes[back_edge_target].clone());
        CyclePath(ids)
    }

    fn index_of(&self, id: &ResourceId) -> GraphResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topo_model::{NetworkSpec, ResourceNode, ResourceSpec};

    fn registry_of(ids: &[&str]) -> ResourceRegistry {
        let mut registry = ResourceRegistry::new();
        for id in ids {
            registry
                .register(ResourceNode::new(
                    *id,
                    ResourceSpec::Network(NetworkSpec {
                        cidr: "10.0.0.0/16".to_string(),
                        max_azs: 2,
                    }),
                ))
                .unwrap();
        }
        registry
    }

    fn order_of(graph: &DependencyGraph) -> Vec<String> {
        graph
            .topological_order()
            .unwrap()
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn test_dependencies_come_first() {
        let registry = registry_of(&["service", "cluster", "net"]);
        let mut graph = DependencyGraph::from_registry(&registry);
        graph.add_edge(&"service".into(), &"cluster".into()).unwrap();
        graph.add_edge(&"cluster".into(), &"net".into()).unwrap();

        assert_eq!(order_of(&graph), vec!["net", "cluster", "service"]);
        assert_eq!(
            graph.dependencies_of(&"service".into()).unwrap(),
            vec!["cluster".into()]
        );
    }

    #[test]
    fn test_unconstrained_nodes_keep_registration_order() {
        let registry = registry_of(&["charlie", "alpha", "bravo"]);
        let graph = DependencyGraph::from_registry(&registry);

        assert_eq!(order_of(&graph), vec!["charlie", "alpha", "bravo"]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let registry = registry_of(&["a", "b", "c", "d"]);
        let mut graph = DependencyGraph::from_registry(&registry);
        graph.add_edge(&"a".into(), &"c".into()).unwrap();
        graph.add_edge(&"b".into(), &"c".into()).unwrap();

        let first = graph.topological_order().unwrap();
        let second = graph.topological_order().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_direct_cycle_detected() {
        let registry = registry_of(&["a", "b"]);
        let mut graph = DependencyGraph::from_registry(&registry);
        graph.add_edge(&"a".into(), &"b".into()).unwrap();
        graph.add_edge(&"b".into(), &"a".into()).unwrap();

        let err = graph.topological_order().unwrap_err();
        match err {
            GraphError::CycleDetected(path) => {
                assert_eq!(path.to_string(), "a -> b -> a");
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_indirect_cycle_detected() {
        let registry = registry_of(&["a", "b", "c", "outside"]);
        let mut graph = DependencyGraph::from_registry(&registry);
        graph.add_edge(&"a".into(), &"b".into()).unwrap();
        graph.add_edge(&"b".into(), &"c".into()).unwrap();
        graph.add_edge(&"c".into(), &"a".into()).unwrap();
        graph.add_edge(&"outside".into(), &"a".into()).unwrap();

        let err = graph.topological_order().unwrap_err();
        match err {
            GraphError::CycleDetected(path) => {
                // The path names only the cycle members, not 'outside'.
                assert_eq!(path.to_string(), "a -> b -> c -> a");
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_cycle_detected() {
        let registry = registry_of(&["a"]);
        let mut graph = DependencyGraph::from_registry(&registry);
        graph.add_edge(&"a".into(), &"a".into()).unwrap();

        let err = graph.topological_order().unwrap_err();
        match err {
            GraphError::CycleDetected(path) => {
                assert_eq!(path.to_string(), "a -> a");
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_to_unknown_node_fails() {
        let registry = registry_of(&["a"]);
        let mut graph = DependencyGraph::from_registry(&registry);
        let err = graph.add_edge(&"a".into(), &"ghost".into()).unwrap_err();
        assert_eq!(err, GraphError::NotFound("ghost".into()));
    }
}
