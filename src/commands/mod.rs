//! # CLI Command Implementations
//!
//! Each subcommand of `jenkins-job-addons` lives in its own file with:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `jenkins_job_addons` library.

pub mod completions;
pub mod generate;
pub mod validate;
