//! `arbor clean` — interactive cleanup of stale worktrees
//!
//! Stale means the worktree's folder no longer matches any remote branch.

use anyhow::Result;
use colored::Colorize;

use crate::deps::Deps;
use crate::reconcile::{ReconciliationService, RemovalOptions};

pub fn execute(deps: &Deps) -> Result<()> {
    let root = super::resolve_root(&deps.config)?;
    let service = ReconciliationService::new(deps, &root);

    println!("Fetching remote state...");
    let stale = service.stale_worktrees()?;

    if stale.is_empty() {
        println!("{}", "no stale worktrees".green());
        return Ok(());
    }

    let report = service.select_and_remove(
        &stale,
        None,
        "Stale worktrees (folder has no matching remote branch):",
        RemovalOptions::default(),
    )?;

    if report.removed.is_empty() && report.failed.is_empty() {
        println!("nothing selected");
        return Ok(());
    }

    println!(
        "{} removed, {} failed",
        report.removed.len().to_string().green(),
        report.failed.len().to_string().red()
    );
    Ok(())
}
