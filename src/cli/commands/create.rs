//! Create command implementation
//!
//! Implements `nglib create <name>`: runs the Angular CLI library generator
//! and links the new library to its sources.

use anyhow::{bail, Context as _, Result};

use super::Context;
use crate::cli::output;
use crate::core::workspace::{validate_library_name, LinkMode};

/// Execute the create command
pub async fn execute(context: &Context, name: &str) -> Result<()> {
    validate_library_name(name)?;

    let mut workspace = context.workspace()?;
    if workspace.library(name).is_ok() {
        bail!("Library '{name}' already exists");
    }
    let ng = context.ng(&workspace)?;

    let spinner = output::create_spinner(&format!("Generating library {name}"));
    let generated = ng.generate_library(name).await;
    spinner.finish_and_clear();
    let generated = generated.with_context(|| format!("Failed to generate library '{name}'"))?;
    if !output::is_quiet() {
        print!("{generated}");
    }

    workspace
        .reload()
        .with_context(|| "Failed to reload angular.json")?;
    workspace
        .link(name, LinkMode::Source)
        .with_context(|| format!("Failed to link '{name}' to its sources"))?;

    output::success(&format!("Created {name}"));
    Ok(())
}
