//! Diff command - Compare two plan documents.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use topo_plan::{PlanDiff, ProvisioningPlan};

#[derive(Args)]
pub struct DiffArgs {
    /// Previous plan document
    old: PathBuf,

    /// New plan document
    new: PathBuf,

    /// Exit with code 1 when the plans differ
    #[arg(long)]
    exit_code: bool,
}

pub fn execute(args: DiffArgs) -> Result<()> {
    info!("Diffing {:?} against {:?}", args.old, args.new);

    let old = ProvisioningPlan::load(&args.old)?;
    let new = ProvisioningPlan::load(&args.new)?;

    let diff = PlanDiff::between(&old, &new);
    if diff.is_empty() {
        println!("✅ No changes");
        return Ok(());
    }

    print!("{}", diff);
    println!(
        "{} added, {} removed, {} changed",
        diff.added.len(),
        diff.removed.len(),
        diff.changed.len()
    );

    if args.exit_code {
        std::process::exit(1);
    }
    Ok(())
}
