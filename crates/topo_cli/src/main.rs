//! topoforge CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or manifest
//! - 3: Validation failure
//! - 4: Structural graph error (duplicate, dangling reference, cycle)
//! - 5: Secret lookup error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod history;
mod pipeline;

use commands::{Cli, Commands};

use topo_graph::GraphError;
use topo_manifest::ManifestError;
use topo_plan::PlanError;
use topo_secrets::SecretError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const GRAPH_ERROR: u8 = 4;
    pub const SECRET_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    // Initialize logging
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Build(args) => commands::build::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Map the typed error behind an anyhow report to an exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(manifest) = e.downcast_ref::<ManifestError>() {
        return match manifest {
            ManifestError::Secret(_) => ExitCodes::SECRET_ERROR,
            _ => ExitCodes::INVALID_ARGS,
        };
    }
    if e.downcast_ref::<SecretError>().is_some() {
        return ExitCodes::SECRET_ERROR;
    }
    if e.downcast_ref::<GraphError>().is_some() {
        return ExitCodes::GRAPH_ERROR;
    }
    if let Some(plan) = e.downcast_ref::<PlanError>() {
        return match plan {
            PlanError::Graph(_) => ExitCodes::GRAPH_ERROR,
            _ => ExitCodes::GENERAL_ERROR,
        };
    }
    ExitCodes::GENERAL_ERROR
}
