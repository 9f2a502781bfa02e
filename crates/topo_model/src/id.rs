//! Resource identifiers.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length of a resource identifier.
pub const MAX_ID_LEN: usize = 64;

const ID_PATTERN: &str = "^[a-z][a-z0-9-]*$";

/// A unique identifier for a declared resource.
///
/// Identifiers are user-declared strings. Their format is checked at
/// registration time, not at construction, so that invalid declarations are
/// reported with the rest of the shape errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the identifier format: lowercase letters, digits and dashes,
    /// starting with a letter, at most [`MAX_ID_LEN`] characters.
    pub fn is_valid(&self) -> bool {
        self.0.len() <= MAX_ID_LEN
            && Regex::new(ID_PATTERN)
                .expect("identifier pattern is well-formed")
                .is_match(&self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
