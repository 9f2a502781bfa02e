//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod build;
pub mod diff;
pub mod init;
pub mod validate;

#[derive(Parser)]
#[command(
    name = "topo",
    version,
    about = "Compile declarative infrastructure manifests into provisioning plans"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample manifest to start from
    Init(init::InitArgs),
    /// Validate a manifest without emitting a plan
    Validate(validate::ValidateArgs),
    /// Compile a manifest into a provisioning plan
    Build(build::BuildArgs),
    /// Compare two plan documents
    Diff(diff::DiffArgs),
}
