//! # topo_plan
//!
//! Provisioning plan emission and diffing for topoforge.
//!
//! A [`ProvisioningPlan`] is the final artifact handed to the external
//! provisioning engine: resources in creation order, each carrying an
//! immutable attribute snapshot and the identifiers it depends on. Emission
//! is pure — emitting twice from the same unmodified context yields
//! byte-identical documents, so plans from consecutive runs can be diffed
//! meaningfully.

pub mod diff;
pub mod emitter;
pub mod error;
pub mod plan;

pub use diff::PlanDiff;
pub use emitter::PlanEmitter;
pub use error::{PlanError, PlanResult};
pub use plan::{PlannedResource, ProvisioningPlan, PLAN_VERSION};
