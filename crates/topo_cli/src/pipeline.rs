//! Shared compile pipeline: manifest to resolved build context.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use topo_graph::BuildContext;
use topo_manifest::ManifestReader;
use topo_policy::ValidationReport;
use topo_secrets::{EnvSecretStore, MemorySecretStore, SecretStore};

use crate::config::{CliConfig, SecretSource, SecretsConfig};

/// Build the secret store selected by configuration.
pub fn secret_store(config: &SecretsConfig) -> Result<Box<dyn SecretStore>> {
    match config.source {
        SecretSource::Env => Ok(Box::new(EnvSecretStore::new(config.prefix.clone()))),
        SecretSource::File => {
            let path = config
                .path
                .as_ref()
                .context("secrets.source = \"file\" requires secrets.path in topo.toml")?;
            Ok(Box::new(MemorySecretStore::from_file(path)?))
        }
        SecretSource::Disabled => Ok(Box::new(MemorySecretStore::new())),
    }
}

/// Read the manifest, register every node, resolve references.
pub fn load_context(manifest: &Path, config: &CliConfig) -> Result<BuildContext> {
    let store = secret_store(&config.secrets)?;
    let reader = ManifestReader::new(store.as_ref());
    let nodes = reader.read_path(manifest)?;
    debug!("Loaded {} resource declarations", nodes.len());

    let mut ctx = BuildContext::new();
    ctx.register_all(nodes)?;
    ctx.resolve()?;
    Ok(ctx)
}

/// Print a validation report the way the rest of the CLI talks.
pub fn print_report(report: &ValidationReport) {
    for violation in report.errors() {
        println!("   ❌ {}", violation);
    }
    for violation in report.warnings() {
        println!("   ⚠️  {}", violation);
    }
}
