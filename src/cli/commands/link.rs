//! Link command implementations
//!
//! Implements `nglib link` and `nglib link-all`, which rewrite the
//! `compilerOptions.paths` entries of tsconfig.json.

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::output;
use crate::core::workspace::LinkMode;

fn describe(mode: LinkMode) -> &'static str {
    match mode {
        LinkMode::Source => "sources",
        LinkMode::Dist => "build output",
    }
}

/// Execute the link command
pub async fn execute(context: &Context, name: &str, mode: LinkMode) -> Result<()> {
    let mut workspace = context.workspace()?;
    workspace
        .link(name, mode)
        .with_context(|| format!("Failed to link '{name}'"))?;

    output::success(&format!("Linked {name} to its {}", describe(mode)));
    Ok(())
}

/// Execute the link-all command
pub async fn execute_all(context: &Context, mode: LinkMode) -> Result<()> {
    let mut workspace = context.workspace()?;
    let count = workspace
        .link_all(mode)
        .with_context(|| "Failed to link libraries")?;

    output::success(&format!("Linked {count} libraries to their {}", describe(mode)));
    Ok(())
}
