//! List command implementation
//!
//! Implements `nglib list`: libraries in build order, each followed by the
//! workspace libraries it depends on.

use std::collections::HashSet;

use anyhow::Result;

use super::Context;
use crate::core::builder::BuildOrchestrator;

/// Execute the list command
pub async fn execute(context: &Context) -> Result<()> {
    let workspace = context.workspace()?;
    let plan = BuildOrchestrator::new(&workspace).plan()?;
    let known: HashSet<&str> = plan.order().into_iter().collect();

    for unit in plan.units() {
        let deps: Vec<&str> = unit
            .dependencies
            .iter()
            .map(String::as_str)
            .filter(|dep| known.contains(dep))
            .collect();
        if deps.is_empty() {
            println!("{}", unit.name);
        } else {
            println!("{} <- {}", unit.name, deps.join(", "));
        }
    }
    Ok(())
}
