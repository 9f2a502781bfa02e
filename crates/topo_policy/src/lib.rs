//! # topo_policy
//!
//! Structural validation rules for topoforge.
//!
//! The validator runs after reference resolution and checks every rule
//! against every resource, collecting all findings into a single
//! [`ValidationReport`] instead of stopping at the first. Callers get the
//! whole picture in one pass and decide whether to proceed; the CLI refuses
//! to emit a plan while error-severity violations are present.

pub mod report;
pub mod rules;

pub use report::{RuleName, RuleSeverity, ValidationReport, Violation};
pub use rules::StackValidator;
