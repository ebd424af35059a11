//! nglib CLI - Angular workspace library helper
//!
//! Entry point for the nglib command-line application.

use anyhow::Result;
use clap::Parser;

use nglib::cli::output::{display_error, OutputConfig};
use nglib::cli::Cli;
use nglib::core::global_config::GlobalConfig;
use nglib::infra::dirs::NglibDirs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match GlobalConfig::load(&NglibDirs::new()) {
        Ok(config) => config,
        Err(e) => {
            display_error(&e.into());
            std::process::exit(1);
        }
    };

    // Apply output configuration globally
    let output_config = OutputConfig::new(cli.quiet, cli.verbose, config.color());
    output_config.apply_global();
    output_config.init_tracing();

    match cli.run(&config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
