//! # topo_model
//!
//! Resource data model for topoforge.
//!
//! A deployment is declared as a set of [`ResourceNode`]s, each carrying a
//! statically typed attribute struct for its kind. Cross-resource wiring is
//! expressed as identifier attributes (a container names its task definition,
//! a listener names its target groups) which the graph layer resolves into
//! [`Reference`] edges.
//!
//! ## Example
//!
//! ```rust
//! use topo_model::{NetworkSpec, ResourceId, ResourceKind, ResourceNode, ResourceSpec};
//!
//! let node = ResourceNode::new(
//!     ResourceId::new("app-network"),
//!     ResourceSpec::Network(NetworkSpec {
//!         cidr: "10.0.0.0/16".to_string(),
//!         max_azs: 2,
//!     }),
//! );
//!
//! assert_eq!(node.kind(), ResourceKind::Network);
//! node.validate_shape().unwrap();
//! ```

pub mod error;
pub mod id;
pub mod reference;
pub mod resource;

pub use error::ModelError;
pub use id::ResourceId;
pub use reference::{AttributeRef, Reference, ReferenceKind};
pub use resource::{
    is_cidr_literal, ClusterSpec, ContainerSpec, HealthCheck, IngressRule, ListenerSpec,
    LoadBalancerSpec, NetworkSpec, PortMapping, Protocol, ResourceKind, ResourceNode,
    ResourceSpec, SecurityGroupSpec, SubnetSpec, SubnetVisibility, TargetGroupSpec,
    TaskDefinitionSpec,
};
