//! Build history records.
//!
//! The plan document itself is deterministic; timestamps live only here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const HISTORY_DIR: &str = ".topo";
pub const HISTORY_FILE: &str = "history.yaml";

/// One successful build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    pub built_at: DateTime<Utc>,
    pub manifest: PathBuf,
    pub plan: PathBuf,
    pub resources: usize,
    pub warnings: usize,
}

impl BuildRecord {
    pub fn new(manifest: &Path, plan: &Path, resources: usize, warnings: usize) -> Self {
        Self {
            built_at: Utc::now(),
            manifest: manifest.to_path_buf(),
            plan: plan.to_path_buf(),
            resources,
            warnings,
        }
    }
}

/// Append a record to `.topo/history.yaml` under the given root.
pub fn append(root: &Path, record: BuildRecord) -> Result<()> {
    let dir = root.join(HISTORY_DIR);
    fs::create_dir_all(&dir)?;
    let path = dir.join(HISTORY_FILE);

    let mut records: Vec<BuildRecord> = if path.exists() {
        serde_yaml::from_str(&fs::read_to_string(&path)?)?
    } else {
        Vec::new()
    };
    records.push(record);

    fs::write(&path, serde_yaml::to_string(&records)?)?;
    debug!("Recorded build in {:?}", path);
    Ok(())
}
