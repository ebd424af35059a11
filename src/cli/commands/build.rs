//! Build command implementation
//!
//! Implements `nglib build`: every library in dependency order, or a single
//! library on its own.

use std::pin::pin;

use anyhow::{Context as _, Result};
use futures::TryStreamExt;

use super::Context;
use crate::cli::output;
use crate::core::builder::BuildOrchestrator;

/// Execute the build command
pub async fn execute(context: &Context, library: Option<&str>, dry_run: bool) -> Result<()> {
    let workspace = context.workspace()?;
    let orchestrator = BuildOrchestrator::new(&workspace);

    if let Some(name) = library {
        if dry_run {
            workspace.library(name)?;
            println!("{name}");
            return Ok(());
        }
        let ng = context.ng(&workspace)?;
        let spinner = output::create_spinner(&format!("Building {name}"));
        let built = orchestrator.build_one(name, &ng).await;
        spinner.finish_and_clear();
        let unit = built?;
        output::success(&format!("Built {}", unit.name));
        return Ok(());
    }

    let plan = orchestrator
        .plan()
        .context("Failed to compute the build order")?;

    if dry_run {
        for name in plan.order() {
            println!("{name}");
        }
        return Ok(());
    }

    if plan.is_empty() {
        output::info("No libraries to build");
        return Ok(());
    }

    let ng = context.ng(&workspace)?;
    let order: Vec<String> = plan.order().into_iter().map(String::from).collect();
    let total = order.len();
    let bar = output::create_build_bar(total as u64);

    let mut results = pin!(plan.execute(&ng));
    let mut built = 0;
    loop {
        if let Some(next) = order.get(built) {
            bar.set_message(next.clone());
        }
        match results.try_next().await {
            Ok(Some(unit)) => {
                built += 1;
                bar.inc(1);
                bar.suspend(|| output::success(&format!("Built {}", unit.name)));
            }
            Ok(None) => break,
            Err(e) => {
                bar.abandon();
                output::warning(&format!("{built} of {total} libraries built"));
                return Err(e.into());
            }
        }
    }

    bar.finish_and_clear();
    output::success(&format!("Built {total} libraries"));
    Ok(())
}
