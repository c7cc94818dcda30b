//! # Generate Command Implementation
//!
//! Loads definition files, generates every job and view, and writes one
//! `<name>.xml` document per unit into the output directory. Without an output
//! directory the documents are printed to stdout in definition order.

use anyhow::{bail, Context, Result};
use clap::Args;
use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use jenkins_job_addons::definitions::{name_filter, Definitions, GeneratedUnit};

/// Generate Jenkins XML from definition files
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Definition files or directories containing `.yaml`/`.yml` files.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Directory to write `<name>.xml` files into. Prints to stdout when omitted.
    #[arg(short, long, value_name = "DIR", env = "JENKINS_JOB_ADDONS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Only generate jobs and views whose name matches this glob.
    #[arg(long, value_name = "GLOB")]
    pub name: Option<String>,
}

/// Execute the `generate` command.
pub fn execute(args: GenerateArgs) -> Result<()> {
    let definitions = Definitions::load_paths(&args.paths)
        .context("Failed to load definitions")?;

    let filter = args
        .name
        .as_deref()
        .map(name_filter)
        .transpose()
        .context("Invalid --name pattern")?;

    let units = definitions
        .generate(filter.as_ref())
        .context("Failed to generate XML")?;

    if units.is_empty() {
        warn!("No jobs or views to generate");
        return Ok(());
    }

    match &args.output {
        Some(dir) => {
            check_file_names(&units)?;
            for unit in &units {
                write_unit(dir, unit)?;
            }
            println!("Wrote {} file(s) to {}", units.len(), dir.display());
        }
        None => {
            for unit in &units {
                print!("{}", unit.to_document()?);
            }
        }
    }
    Ok(())
}

/// Every unit must map to its own file directly inside the output directory.
fn check_file_names(units: &[GeneratedUnit]) -> Result<()> {
    let mut seen = HashSet::new();
    for unit in units {
        let name = unit.name.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            bail!(
                "Cannot write {} '{}': names used as file names must not contain path separators",
                unit.kind.as_str(),
                name
            );
        }
        if !seen.insert(name) {
            bail!("More than one job or view is named '{}'; output files would collide", name);
        }
    }
    Ok(())
}

fn write_unit(dir: &Path, unit: &GeneratedUnit) -> Result<()> {
    let path = dir.join(format!("{}.xml", unit.name));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, unit.to_document()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} '{}' to {}", unit.kind.as_str(), unit.name, path.display());
    Ok(())
}
