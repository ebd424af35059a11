//! Check command implementation
//!
//! Implements `nglib check`: locates the workspace and validates the
//! installed Angular CLI.

use anyhow::Result;

use super::Context;
use crate::cli::output;

/// Execute the check command
pub async fn execute(context: &Context) -> Result<()> {
    let workspace = context.workspace()?;
    let libraries = workspace.libraries().count();

    output::success(&format!(
        "Angular workspace found at {}",
        workspace.root().display()
    ));
    output::info(&format!("{libraries} libraries"));
    Ok(())
}
