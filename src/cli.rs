//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// jenkins-job-addons - Generate Jenkins folder and view XML from YAML definitions
#[derive(Parser, Debug)]
#[command(name = "jenkins-job-addons")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace). `RUST_LOG` takes precedence.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate XML for every job and view in the definition files
    Generate(commands::generate::GenerateArgs),

    /// Check that the definition files generate without errors
    Validate(commands::validate::ValidateArgs),

    /// Print shell completions
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Generate(args) => commands::generate::execute(args),
            Commands::Validate(args) => commands::validate::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // Already initialized when running under a test harness.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
