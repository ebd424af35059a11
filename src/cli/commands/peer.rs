//! Peer command implementation
//!
//! Implements `nglib peer <target> <dependency>`.

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::output;

/// Execute the peer command
pub async fn execute(context: &Context, target: &str, dependency: &str) -> Result<()> {
    let workspace = context.workspace()?;
    let requirement = workspace
        .add_peer_dependency(target, dependency)
        .with_context(|| format!("Failed to add peer dependency {dependency} to {target}"))?;

    output::success(&format!("{target} now depends on {dependency}@{requirement}"));
    Ok(())
}
