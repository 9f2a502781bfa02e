//! Plan-to-plan diffing.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use topo_model::ResourceId;

use crate::plan::ProvisioningPlan;

/// The difference between two plan documents.
///
/// Identifiers are reported in the new plan's order (removed resources in the
/// old plan's order).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanDiff {
    pub added: Vec<ResourceId>,
    pub removed: Vec<ResourceId>,
    pub changed: Vec<ResourceId>,
}

impl PlanDiff {
    /// Compare two plans by resource identity and content.
    pub fn between(old: &ProvisioningPlan, new: &ProvisioningPlan) -> Self {
        let old_ids: BTreeSet<&ResourceId> = old.resources.iter().map(|r| &r.id).collect();
        let new_ids: BTreeSet<&ResourceId> = new.resources.iter().map(|r| &r.id).collect();

        let added = new
            .resources
            .iter()
            .filter(|r| !old_ids.contains(&r.id))
            .map(|r| r.id.clone())
            .collect();

        let removed = old
            .resources
            .iter()
            .filter(|r| !new_ids.contains(&r.id))
            .map(|r| r.id.clone())
            .collect();

        let changed = new
            .resources
            .iter()
            .filter(|r| old.get(&r.id).map_or(false, |previous| previous != *r))
            .map(|r| r.id.clone())
            .collect();

        Self {
            added,
            removed,
            changed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

impl fmt::Display for PlanDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "no changes");
        }
        for id in &self.added {
            writeln!(f, "+ {}", id)?;
        }
        for id in &self.removed {
            writeln!(f, "- {}", id)?;
        }
        for id in &self.changed {
            writeln!(f, "~ {}", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topo_model::{NetworkSpec, ResourceSpec};

    use crate::plan::{PlannedResource, ProvisioningPlan, PLAN_VERSION};

    fn network(id: &str, cidr: &str) -> PlannedResource {
        PlannedResource {
            id: id.into(),
            spec: ResourceSpec::Network(NetworkSpec {
                cidr: cidr.to_string(),
                max_azs: 2,
            }),
            depends_on: Vec::new(),
        }
    }

    fn plan_of(resources: Vec<PlannedResource>) -> ProvisioningPlan {
        ProvisioningPlan {
            version: PLAN_VERSION,
            resources,
        }
    }

    #[test]
    fn test_diff_of_identical_plans_is_empty() {
        let plan = plan_of(vec![network("app-network", "10.0.0.0/16")]);
        let diff = PlanDiff::between(&plan, &plan.clone());
        assert!(diff.is_empty());
        assert_eq!(diff.to_string(), "no changes");
    }

    #[test]
    fn test_diff_reports_added_and_removed() {
        let old = plan_of(vec![network("old-network", "10.0.0.0/16")]);
        let new = plan_of(vec![network("new-network", "10.1.0.0/16")]);

        let diff = PlanDiff::between(&old, &new);
        assert_eq!(diff.added, vec!["new-network".into()]);
        assert_eq!(diff.removed, vec!["old-network".into()]);
        assert!(diff.changed.is_empty());
    }

    #[test]
    fn test_diff_reports_changed_attributes() {
        let old = plan_of(vec![network("app-network", "10.0.0.0/16")]);
        let new = plan_of(vec![network("app-network", "10.2.0.0/16")]);

        let diff = PlanDiff::between(&old, &new);
        assert_eq!(diff.changed, vec!["app-network".into()]);
        assert!(diff.to_string().contains("~ app-network"));
    }
}
