//! # jenkins-job-addons CLI
//!
//! Binary entry point for the `jenkins-job-addons` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initializing logging.
//! - Executing the selected command and reporting top-level errors.
//!
//! All generation logic lives in the `jenkins_job_addons` library crate; the
//! binary only wires files and flags to it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
