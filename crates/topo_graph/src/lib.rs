//! # topo_graph
//!
//! Resource registry, reference resolution and dependency ordering for
//! topoforge.
//!
//! Plan construction is two-phase: every declared node is registered first,
//! then all identifier attributes are resolved into edges. Forward references
//! within one declaration batch therefore work regardless of declaration
//! order. A [`BuildContext`] owns the registry and the dependency graph for
//! one build; there is no process-wide state, so independent builds need no
//! coordination.
//!
//! ## Example
//!
//! ```rust
//! use topo_graph::BuildContext;
//! use topo_model::{ClusterSpec, NetworkSpec, ResourceNode, ResourceSpec};
//!
//! let mut ctx = BuildContext::new();
//! // Forward reference: the cluster is declared before its network.
//! ctx.register(ResourceNode::new(
//!     "app-cluster",
//!     ResourceSpec::Cluster(ClusterSpec { network: "app-network".into() }),
//! ))
//! .unwrap();
//! ctx.register(ResourceNode::new(
//!     "app-network",
//!     ResourceSpec::Network(NetworkSpec { cidr: "10.0.0.0/16".to_string(), max_azs: 2 }),
//! ))
//! .unwrap();
//!
//! ctx.resolve().unwrap();
//! let order = ctx.topological_order().unwrap();
//! assert_eq!(order[0].as_str(), "app-network");
//! ```

pub mod context;
pub mod error;
pub mod graph;
pub mod registry;
pub mod resolver;

pub use context::BuildContext;
pub use error::{CyclePath, GraphError, GraphResult};
pub use graph::DependencyGraph;
pub use registry::ResourceRegistry;
pub use resolver::ReferenceResolver;
