//! Manifest file and directory reading.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;
use walkdir::WalkDir;

use topo_model::ResourceNode;
use topo_secrets::SecretStore;

use crate::error::{ManifestError, ManifestResult};

/// The manifest format version this reader understands.
pub const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    resources: Vec<Value>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

/// Reader turning manifest files into resource nodes.
///
/// Secret references are resolved during reading, so the returned nodes carry
/// only opaque values.
pub struct ManifestReader<'a> {
    store: &'a dyn SecretStore,
}

impl<'a> ManifestReader<'a> {
    pub fn new(store: &'a dyn SecretStore) -> Self {
        Self { store }
    }

    /// Read a manifest file, or every manifest file under a directory.
    ///
    /// Directory reads sort files by path so the declaration batch is
    /// deterministic across runs.
    pub fn read_path(&self, path: impl AsRef<Path>) -> ManifestResult<Vec<ResourceNode>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }

        if path.is_dir() {
            let mut files: Vec<_> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .filter(|e| {
                    e.path()
                        .extension()
                        .map_or(false, |ext| ext == "yaml" || ext == "yml")
                })
                .map(|e| e.path().to_path_buf())
                .collect();
            files.sort();

            if files.is_empty() {
                return Err(ManifestError::EmptyDirectory(path.to_path_buf()));
            }

            let mut nodes = Vec::new();
            for file in files {
                nodes.extend(self.read_file(&file)?);
            }
            Ok(nodes)
        } else {
            self.read_file(path)
        }
    }

    fn read_file(&self, path: &Path) -> ManifestResult<Vec<ResourceNode>> {
        debug!("Reading manifest from {:?}", path);
        let content = fs::read_to_string(path)?;
        self.read_str(&content, path)
    }

    /// Parse manifest content. `origin` is used for diagnostics only.
    pub fn read_str(&self, content: &str, origin: &Path) -> ManifestResult<Vec<ResourceNode>> {
        let raw: RawManifest =
            serde_yaml::from_str(content).map_err(|e| ManifestError::InvalidFormat {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        if raw.version > SUPPORTED_VERSION {
            return Err(ManifestError::UnsupportedVersion {
                found: raw.version,
                supported: SUPPORTED_VERSION,
            });
        }

        let mut nodes = Vec::with_capacity(raw.resources.len());
        for mut value in raw.resources {
            self.resolve_secrets(&mut value)?;
            let node: ResourceNode =
                serde_yaml::from_value(value).map_err(|e| ManifestError::InvalidFormat {
                    path: origin.to_path_buf(),
                    message: e.to_string(),
                })?;
            nodes.push(node);
        }

        debug!("Read {} resources from {:?}", nodes.len(), origin);
        Ok(nodes)
    }

    /// Replace every `{ secret: /path }` value with the store's value.
    fn resolve_secrets(&self, value: &mut Value) -> ManifestResult<()> {
        match value {
            Value::Mapping(mapping) => {
                for (_, entry) in mapping.iter_mut() {
                    if let Some(path) = secret_reference(entry) {
                        *entry = Value::String(self.store.lookup(&path)?);
                    } else {
                        self.resolve_secrets(entry)?;
                    }
                }
            }
            Value::Sequence(sequence) => {
                for entry in sequence.iter_mut() {
                    if let Some(path) = secret_reference(entry) {
                        *entry = Value::String(self.store.lookup(&path)?);
                    } else {
                        self.resolve_secrets(entry)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// A `{ secret: /path }` mapping with exactly one key.
fn secret_reference(value: &Value) -> Option<String> {
    let mapping = value.as_mapping()?;
    if mapping.len() != 1 {
        return None;
    }
    let (key, path) = mapping.iter().next()?;
    if key.as_str() == Some("secret") {
        path.as_str().map(|s| s.to_string())
    } else {
        None
    }
}
