//! Resolution of identifier attributes into reference edges.

use tracing::debug;

use topo_model::{is_cidr_literal, Reference, ReferenceKind, ResourceSpec};

use crate::error::{GraphError, GraphResult};
use crate::registry::ResourceRegistry;

/// Resolves every identifier attribute in the registry into a [`Reference`].
///
/// Resolution runs only after the whole declaration batch is registered, so
/// forward references succeed regardless of declaration order. The first
/// unresolvable identifier attribute aborts with
/// [`GraphError::DanglingReference`] — an unresolved reference is never
/// silently dropped.
pub struct ReferenceResolver;

impl ReferenceResolver {
    /// Resolve all nodes in the registry, in declaration order.
    pub fn resolve(registry: &ResourceRegistry) -> GraphResult<Vec<Reference>> {
        let mut references = Vec::new();

        for node in registry.iter() {
            for attr in node.spec.references() {
                if !registry.contains(&attr.target) {
                    return Err(GraphError::DanglingReference {
                        from: node.id.clone(),
                        attribute: attr.attribute,
                        target: attr.target,
                    });
                }
                references.push(Reference::new(
                    node.id.clone(),
                    attr.target,
                    attr.kind,
                    attr.attribute,
                ));
            }

            // Ingress peers are soft references: a peer may be a CIDR literal,
            // and a peer that resolves to nothing is a validation finding, not
            // a structural failure. Peers that do name a declared node still
            // contribute an ordering edge.
            if let ResourceSpec::SecurityGroup(spec) = &node.spec {
                for rule in &spec.ingress {
                    if is_cidr_literal(&rule.peer) {
                        continue;
                    }
                    let peer = rule.peer.as_str().into();
                    if registry.contains(&peer) {
                        references.push(Reference::new(
                            node.id.clone(),
                            peer,
                            ReferenceKind::AllowsIngressFrom,
                            "ingress",
                        ));
                    }
                }
            }
        }

        debug!(
            "Resolved {} references across {} resources",
            references.len(),
            registry.len()
        );
        Ok(references)
    }
}
