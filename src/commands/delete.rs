//! `arbor delete` — remove chosen worktrees (all-worktrees mode)

use anyhow::Result;
use colored::Colorize;

use crate::deps::Deps;
use crate::reconcile::{ReconciliationService, RemovalOptions};

pub fn execute(
    deps: &Deps,
    branches: Vec<String>,
    force: bool,
    delete_branch: bool,
) -> Result<()> {
    let root = super::resolve_root(&deps.config)?;
    let service = ReconciliationService::new(deps, &root);

    let candidates = service.all_worktrees()?;
    if candidates.is_empty() {
        println!("no worktrees found");
        return Ok(());
    }

    let preselected = if branches.is_empty() {
        None
    } else {
        Some(branches.as_slice())
    };

    let report = service.select_and_remove(
        &candidates,
        preselected,
        "Select worktrees to delete:",
        RemovalOptions {
            force,
            delete_branches: delete_branch,
        },
    )?;

    if report.removed.is_empty() && report.failed.is_empty() {
        println!("nothing selected");
    } else {
        println!(
            "{} removed, {} failed",
            report.removed.len().to_string().green(),
            report.failed.len().to_string().red()
        );
    }

    if !report.failed.is_empty() {
        anyhow::bail!("{} worktree(s) could not be removed", report.failed.len());
    }
    Ok(())
}
