//! Plan emission.

use std::collections::HashMap;

use tracing::info;

use topo_graph::BuildContext;
use topo_model::ResourceId;

use crate::error::PlanResult;
use crate::plan::{PlannedResource, ProvisioningPlan, PLAN_VERSION};

/// Walks the resolved graph in creation order and emits the plan.
///
/// Emission is pure: it reads the context, takes attribute snapshots, and
/// produces a document. Calling it twice on the same unmodified context
/// yields byte-identical plans. The caller is responsible for validating the
/// context first; the CLI refuses to emit while error-severity violations are
/// present.
pub struct PlanEmitter;

impl PlanEmitter {
    /// Emit the provisioning plan for a resolved context.
    pub fn emit(ctx: &BuildContext) -> PlanResult<ProvisioningPlan> {
        let order = ctx.topological_order()?;

        // Dependency lists mirror the resolved references, deduplicated and
        // sorted by registration order so output is stable across runs.
        let mut depends_on: HashMap<&ResourceId, Vec<ResourceId>> = HashMap::new();
        for reference in ctx.references() {
            let deps = depends_on.entry(&reference.from).or_default();
            if !deps.contains(&reference.to) {
                deps.push(reference.to.clone());
            }
        }
        for deps in depends_on.values_mut() {
            deps.sort_by_key(|id| ctx.registry().position(id));
        }

        let mut resources = Vec::with_capacity(order.len());
        for id in &order {
            let node = ctx.registry().get(id)?;
            resources.push(PlannedResource {
                id: node.id.clone(),
                spec: node.spec.clone(),
                depends_on: depends_on.remove(id).unwrap_or_default(),
            });
        }

        info!("Emitted plan with {} resources", resources.len());
        Ok(ProvisioningPlan {
            version: PLAN_VERSION,
            resources,
        })
    }
}
