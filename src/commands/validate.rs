//! # Validate Command Implementation
//!
//! Loads definition files and runs the full generation without writing
//! anything, so that missing required fields, invalid choices, unknown view
//! types and template errors are reported up front. This command is a
//! read-only operation.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use jenkins_job_addons::definitions::{Definitions, UnitKind};

/// Validate definition files without writing any output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Definition files or directories containing `.yaml`/`.yml` files.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs) -> Result<()> {
    let definitions = Definitions::load_paths(&args.paths)
        .context("Failed to load definitions")?;

    let units = definitions
        .generate(None)
        .context("Definitions do not generate")?;

    let jobs = units.iter().filter(|u| u.kind == UnitKind::Job).count();
    let views = units.len() - jobs;

    println!("Definitions are valid");
    println!("   Jobs: {}", jobs);
    println!("   Views: {}", views);
    for unit in &units {
        println!("   {:<5} {}", unit.kind.as_str(), unit.name);
    }
    Ok(())
}
