//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::Commands;

use crate::core::global_config::GlobalConfig;

/// nglib - Angular workspace library helper
///
/// Manage the libraries of an Angular workspace: path linking, peer
/// dependencies and dependency-ordered builds.
#[derive(Parser, Debug)]
#[command(name = "nglib")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Start looking for the workspace in this directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Command used to invoke the Angular CLI
    #[arg(long, env = "NGLIB_NG", value_name = "COMMAND", global = true)]
    pub ng: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    ///
    /// `--ng` takes precedence over the command from the global config.
    pub async fn run(self, config: &GlobalConfig) -> Result<()> {
        if let Some(cmd) = self.command {
            let start = match self.directory {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let context = commands::Context {
                start,
                ng_command: self
                    .ng
                    .unwrap_or_else(|| config.ng_command().to_string()),
            };
            cmd.run(&context).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
