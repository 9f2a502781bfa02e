//! Plan document types.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use topo_model::{ResourceId, ResourceSpec};

use crate::error::{PlanError, PlanResult};

/// The plan document format version.
pub const PLAN_VERSION: u32 = 1;

/// One resource in the plan: identifier, kind-tagged attribute snapshot, and
/// the identifiers it depends on (all of which precede it in the plan).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedResource {
    pub id: ResourceId,
    #[serde(flatten)]
    pub spec: ResourceSpec,
    #[serde(default)]
    pub depends_on: Vec<ResourceId>,
}

/// The ordered, validated provisioning plan.
///
/// Immutable once emitted: the attribute snapshots are clones taken at
/// emission time, so later mutation of the source declarations cannot change
/// an already-emitted plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningPlan {
    pub version: u32,
    pub resources: Vec<PlannedResource>,
}

impl ProvisioningPlan {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&PlannedResource> {
        self.resources.iter().find(|r| &r.id == id)
    }

    /// Serialize to the canonical YAML document.
    pub fn to_yaml(&self) -> PlanResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> PlanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a plan from its YAML document.
    pub fn from_yaml(content: &str) -> PlanResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a plan document from disk (YAML).
    pub fn load(path: impl AsRef<Path>) -> PlanResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PlanError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
