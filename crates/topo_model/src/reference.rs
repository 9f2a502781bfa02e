//! Typed edges between resources.

use std::fmt;

use serde::Serialize;

use crate::id::ResourceId;

/// The relationship a reference expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Subnets, clusters, load balancers, target groups and security groups
    /// live inside a network.
    WithinNetwork,
    /// A container belongs to its task definition.
    BelongsTo,
    /// A task definition is scheduled onto a cluster.
    ScheduledOn,
    /// A listener is attached to its load balancer.
    AttachedTo,
    /// A listener routes traffic to a target group.
    RoutesTo,
    /// A security group admits traffic from another security group.
    AllowsIngressFrom,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::WithinNetwork => "within_network",
            ReferenceKind::BelongsTo => "belongs_to",
            ReferenceKind::ScheduledOn => "scheduled_on",
            ReferenceKind::AttachedTo => "attached_to",
            ReferenceKind::RoutesTo => "routes_to",
            ReferenceKind::AllowsIngressFrom => "allows_ingress_from",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identifier attribute on a resource spec, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRef {
    pub kind: ReferenceKind,
    pub attribute: &'static str,
    pub target: ResourceId,
}

impl AttributeRef {
    pub fn new(kind: ReferenceKind, attribute: &'static str, target: ResourceId) -> Self {
        Self {
            kind,
            attribute,
            target,
        }
    }
}

/// A resolved edge between two declared resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub from: ResourceId,
    pub to: ResourceId,
    pub kind: ReferenceKind,
    pub attribute: &'static str,
}

impl Reference {
    pub fn new(
        from: ResourceId,
        to: ResourceId,
        kind: ReferenceKind,
        attribute: &'static str,
    ) -> Self {
        Self {
            from,
            to,
            kind,
            attribute,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.from, self.kind, self.to)
    }
}
