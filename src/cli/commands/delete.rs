//! Delete command implementation
//!
//! Implements `nglib delete <name>`.

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::output;

/// Execute the delete command
pub async fn execute(context: &Context, name: &str) -> Result<()> {
    let mut workspace = context.workspace()?;
    let root = workspace.library(name)?.root.clone();

    workspace
        .remove_library(name)
        .with_context(|| format!("Failed to delete library '{name}'"))?;

    output::success(&format!("Deleted {name} ({root})"));
    Ok(())
}
