//! CLI configuration file (`topo.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "topo.toml";

/// Optional CLI configuration.
///
/// ```toml
/// [output]
/// plan = "plan.yaml"
/// format = "yaml"
///
/// [secrets]
/// source = "env"
/// prefix = "TOPO"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub output: OutputConfig,
    pub secrets: SecretsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub plan: PathBuf,
    pub format: PlanFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plan: PathBuf::from("plan.yaml"),
            format: PlanFormat::Yaml,
        }
    }
}

/// Plan document output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PlanFormat {
    Yaml,
    Json,
}

/// Where secret references in manifests are resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretSource {
    /// Environment variables, mangled from the secret path.
    Env,
    /// A flat YAML map file (see `secrets.path`).
    File,
    /// No store; any secret reference fails the build.
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    pub source: SecretSource,
    pub prefix: String,
    pub path: Option<PathBuf>,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            source: SecretSource::Env,
            prefix: "TOPO".to_string(),
            path: None,
        }
    }
}

impl CliConfig {
    /// Load `topo.toml` from the given directory, or defaults when absent.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_missing() {
        let dir = tempdir().unwrap();
        let config = CliConfig::load_or_default(dir.path()).unwrap();

        assert_eq!(config.output.plan, PathBuf::from("plan.yaml"));
        assert_eq!(config.output.format, PlanFormat::Yaml);
        assert_eq!(config.secrets.source, SecretSource::Env);
        assert_eq!(config.secrets.prefix, "TOPO");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[output]
plan = "out/plan.json"
format = "json"

[secrets]
source = "file"
path = "secrets.yaml"
"#,
        )
        .unwrap();

        let config = CliConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.output.format, PlanFormat::Json);
        assert_eq!(config.secrets.source, SecretSource::File);
        assert_eq!(config.secrets.path, Some(PathBuf::from("secrets.yaml")));
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[output]\nformat = \"xml\"\n").unwrap();

        assert!(CliConfig::load_or_default(dir.path()).is_err());
    }
}
