//! Violations and the aggregated validation report.

use std::fmt;

use serde::Serialize;

use topo_model::ResourceId;

/// Severity of a rule finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
    Error,
    Warning,
}

/// The validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    EmptyTaskDefinition,
    PortConflict,
    MissingTargetGroup,
    InvalidHealthCheck,
    UnresolvedIngressPeer,
    MissingLogPrefix,
    SingleAvailabilityZone,
}

impl RuleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::EmptyTaskDefinition => "empty-task-definition",
            RuleName::PortConflict => "port-conflict",
            RuleName::MissingTargetGroup => "missing-target-group",
            RuleName::InvalidHealthCheck => "invalid-health-check",
            RuleName::UnresolvedIngressPeer => "unresolved-ingress-peer",
            RuleName::MissingLogPrefix => "missing-log-prefix",
            RuleName::SingleAvailabilityZone => "single-availability-zone",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule finding against one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub resource: ResourceId,
    pub rule: RuleName,
    pub severity: RuleSeverity,
    pub message: String,
}

impl Violation {
    pub fn error(resource: ResourceId, rule: RuleName, message: impl Into<String>) -> Self {
        Self {
            resource,
            rule,
            severity: RuleSeverity::Error,
            message: message.into(),
        }
    }

    pub fn warning(resource: ResourceId, rule: RuleName, message: impl Into<String>) -> Self {
        Self {
            resource,
            rule,
            severity: RuleSeverity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.resource, self.message)
    }
}

/// All findings from one validation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// True when no error-severity violation was found. Warnings alone do not
    /// fail a build.
    pub fn passed(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == RuleSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == RuleSeverity::Warning)
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}
