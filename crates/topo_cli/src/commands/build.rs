//! Build command - Compile a manifest into a provisioning plan.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use topo_plan::PlanEmitter;
use topo_policy::StackValidator;

use crate::config::{CliConfig, PlanFormat};
use crate::history::{self, BuildRecord};
use crate::pipeline;
use crate::ExitCodes;

#[derive(Args)]
pub struct BuildArgs {
    /// Manifest file, or directory of manifest files
    #[arg(short = 'f', long, default_value = "stack.yaml")]
    manifest: PathBuf,

    /// Plan output path (default from topo.toml, falling back to plan.yaml)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Plan output format
    #[arg(long, value_enum)]
    format: Option<PlanFormat>,

    /// Append a build record to .topo/history.yaml
    #[arg(long)]
    record: bool,
}

pub fn execute(args: BuildArgs) -> Result<()> {
    info!("Building plan from {:?}", args.manifest);

    let current_dir = std::env::current_dir()?;
    let config = CliConfig::load_or_default(&current_dir)?;

    let ctx = pipeline::load_context(&args.manifest, &config)?;

    let report = StackValidator::validate(&ctx);
    pipeline::print_report(&report);
    if !report.passed() {
        println!(
            "❌ Validation failed with {} violations. No plan emitted.",
            report.errors().count()
        );
        std::process::exit(ExitCodes::VALIDATION_FAILURE as i32);
    }

    let plan = PlanEmitter::emit(&ctx)?;

    let output = args.output.unwrap_or_else(|| config.output.plan.clone());
    let format = args.format.unwrap_or(config.output.format);
    let document = match format {
        PlanFormat::Yaml => plan.to_yaml()?,
        PlanFormat::Json => plan.to_json()?,
    };
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output, &document)?;

    println!(
        "✅ Plan with {} resources written to {}",
        plan.len(),
        output.display()
    );

    if args.record {
        let record = BuildRecord::new(
            &args.manifest,
            &output,
            plan.len(),
            report.warnings().count(),
        );
        history::append(&current_dir, record)?;
    }

    Ok(())
}
