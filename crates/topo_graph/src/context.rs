//! Build context owning the per-build pipeline state.

use tracing::info;

use topo_model::{Reference, ResourceId, ResourceNode};

use crate::error::GraphResult;
use crate::graph::DependencyGraph;
use crate::registry::ResourceRegistry;
use crate::resolver::ReferenceResolver;

/// Explicit owner of the registry and dependency graph for one build.
///
/// Each build constructs its own context; nothing is shared across builds, so
/// independent builds can run concurrently without coordination. The pipeline
/// is two-phase: register every node, then call [`BuildContext::resolve`]
/// once. Ordering and emission require a resolved context.
#[derive(Debug, Default)]
pub struct BuildContext {
    registry: ResourceRegistry,
    references: Vec<Reference>,
    graph: DependencyGraph,
}

impl BuildContext {
    /// Create an empty build context.
    pub fn new() -> Self {
        Self {
            registry: ResourceRegistry::new(),
            references: Vec::new(),
            graph: DependencyGraph::default(),
        }
    }

    /// Register a declared resource.
    pub fn register(&mut self, node: ResourceNode) -> GraphResult<()> {
        self.registry.register(node)
    }

    /// Register a whole declaration batch.
    pub fn register_all(
        &mut self,
        nodes: impl IntoIterator<Item = ResourceNode>,
    ) -> GraphResult<()> {
        for node in nodes {
            self.register(node)?;
        }
        Ok(())
    }

    /// Resolve every identifier attribute and build the dependency graph.
    ///
    /// Fails with `DanglingReference` on the first identifier naming an
    /// unregistered resource; in that case no graph is built and the build
    /// aborts before validation or emission.
    pub fn resolve(&mut self) -> GraphResult<()> {
        let references = ReferenceResolver::resolve(&self.registry)?;

        let mut graph = DependencyGraph::from_registry(&self.registry);
        graph.add_references(&references)?;

        info!(
            "Resolved build: {} resources, {} references",
            self.registry.len(),
            references.len()
        );
        self.references = references;
        self.graph = graph;
        Ok(())
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Creation order for the resolved graph.
    pub fn topological_order(&self) -> GraphResult<Vec<ResourceId>> {
        self.graph.topological_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topo_model::{
        ClusterSpec, ContainerSpec, NetworkSpec, ResourceSpec, TaskDefinitionSpec,
    };

    fn sample_nodes() -> Vec<ResourceNode> {
        vec![
            ResourceNode::new(
                "web",
                ResourceSpec::Container(ContainerSpec {
                    task_definition: "app-task".into(),
                    image: "ghcr.io/example/node:main".to_string(),
                    port_mappings: Vec::new(),
                    environment: Default::default(),
                    log_stream_prefix: None,
                    essential: true,
                }),
            ),
            ResourceNode::new(
                "app-task",
                ResourceSpec::TaskDefinition(TaskDefinitionSpec {
                    cluster: Some("app-cluster".into()),
                    cpu: 256,
                    memory_mib: 512,
                }),
            ),
            ResourceNode::new(
                "app-cluster",
                ResourceSpec::Cluster(ClusterSpec {
                    network: "app-network".into(),
                }),
            ),
            ResourceNode::new(
                "app-network",
                ResourceSpec::Network(NetworkSpec {
                    cidr: "10.0.0.0/16".to_string(),
                    max_azs: 2,
                }),
            ),
        ]
    }

    #[test]
    fn test_pipeline_orders_dependencies_first() {
        let mut ctx = BuildContext::new();
        ctx.register_all(sample_nodes()).unwrap();
        ctx.resolve().unwrap();

        let order = ctx.topological_order().unwrap();
        let pos = |id: &str| order.iter().position(|o| o.as_str() == id).unwrap();

        assert!(pos("app-network") < pos("app-cluster"));
        assert!(pos("app-cluster") < pos("app-task"));
        assert!(pos("app-task") < pos("web"));
    }

    #[test]
    fn test_every_node_after_its_references() {
        let mut ctx = BuildContext::new();
        ctx.register_all(sample_nodes()).unwrap();
        ctx.resolve().unwrap();

        let order = ctx.topological_order().unwrap();
        let pos = |id: &ResourceId| order.iter().position(|o| o == id).unwrap();

        for reference in ctx.references() {
            assert!(
                pos(&reference.to) < pos(&reference.from),
                "{} must come before {}",
                reference.to,
                reference.from
            );
        }
    }
}
