//! Validate command - Validate a manifest without emitting a plan.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use topo_policy::StackValidator;

use crate::config::CliConfig;
use crate::pipeline;
use crate::ExitCodes;

#[derive(Args)]
pub struct ValidateArgs {
    /// Manifest file, or directory of manifest files
    #[arg(short = 'f', long, default_value = "stack.yaml")]
    manifest: PathBuf,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating manifest {:?}", args.manifest);

    let current_dir = std::env::current_dir()?;
    let config = CliConfig::load_or_default(&current_dir)?;

    let ctx = pipeline::load_context(&args.manifest, &config)?;
    println!(
        "📋 Resolved {} resources, {} references",
        ctx.registry().len(),
        ctx.references().len()
    );

    let report = StackValidator::validate(&ctx);
    pipeline::print_report(&report);

    if report.passed() {
        println!("✅ Validation passed");
        Ok(())
    } else {
        println!(
            "❌ Validation failed with {} violations. No plan will be emitted.",
            report.errors().count()
        );
        std::process::exit(ExitCodes::VALIDATION_FAILURE as i32);
    }
}
