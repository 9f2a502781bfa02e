//! Secret store implementations.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{SecretError, SecretResult};

/// Opaque key-value lookup for secrets named by path.
///
/// Paths follow the parameter-store convention, e.g.
/// `/worktask/database-password`.
pub trait SecretStore {
    /// Look up the secret at `path`, failing with
    /// [`SecretError::SecretNotFound`] when it does not exist.
    fn lookup(&self, path: &str) -> SecretResult<String>;
}

/// In-memory store, optionally loaded from a YAML map file.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    values: BTreeMap<String, String>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Load a store from a YAML file containing a flat `path: value` map.
    pub fn from_file(path: impl AsRef<Path>) -> SecretResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let values: BTreeMap<String, String> = serde_yaml::from_str(&content)?;
        debug!("Loaded {} secrets from {:?}", values.len(), path.as_ref());
        Ok(Self { values })
    }

    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) {
        self.values.insert(path.into(), value.into());
    }

    pub fn with(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(path, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SecretStore for MemorySecretStore {
    fn lookup(&self, path: &str) -> SecretResult<String> {
        self.values
            .get(path)
            .cloned()
            .ok_or_else(|| SecretError::SecretNotFound(path.to_string()))
    }
}

/// Store backed by process environment variables.
///
/// A path is mangled into a variable name by uppercasing, replacing
/// non-alphanumeric runs with underscores and prepending the prefix:
/// `/worktask/database-username` with prefix `TOPO` reads
/// `TOPO_WORKTASK_DATABASE_USERNAME`.
#[derive(Debug, Clone)]
pub struct EnvSecretStore {
    prefix: String,
}

impl EnvSecretStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The environment variable name a path maps to.
    pub fn variable_name(&self, path: &str) -> String {
        let mut name = self.prefix.clone();
        let mut last_was_separator = true;
        for ch in path.chars() {
            if ch.is_ascii_alphanumeric() {
                if last_was_separator {
                    name.push('_');
                }
                name.push(ch.to_ascii_uppercase());
                last_was_separator = false;
            } else {
                last_was_separator = true;
            }
        }
        name
    }
}

impl SecretStore for EnvSecretStore {
    fn lookup(&self, path: &str) -> SecretResult<String> {
        let variable = self.variable_name(path);
        debug!("Looking up secret {} via ${}", path, variable);
        std::env::var(&variable).map_err(|_| SecretError::SecretNotFound(path.to_string()))
    }
}
