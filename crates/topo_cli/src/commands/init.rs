//! Init command - Write a sample manifest.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use topo_manifest::write_sample;

#[derive(Args)]
pub struct InitArgs {
    /// Where to write the sample manifest
    #[arg(default_value = "stack.yaml")]
    path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub fn execute(args: InitArgs) -> Result<()> {
    info!("Initializing manifest at {:?}", args.path);

    if args.force && args.path.exists() {
        fs::remove_file(&args.path)?;
    }
    write_sample(&args.path)?;

    println!("✅ Wrote sample manifest to {}", args.path.display());
    println!();
    println!("   The sample resolves database credentials from secrets. With the");
    println!("   default env store, export:");
    println!("     TOPO_WORKTASK_DATABASE_USERNAME");
    println!("     TOPO_WORKTASK_DATABASE_PASSWORD");
    println!("   or point [secrets] in topo.toml at a file store.");
    Ok(())
}
