//! `arbor list` — print worktrees, most recently used first

use anyhow::Result;
use colored::Colorize;

use crate::deps::Deps;
use crate::reconcile::ReconciliationService;

pub fn execute(deps: &Deps, verbose: bool) -> Result<()> {
    let root = super::resolve_root(&deps.config)?;
    let service = ReconciliationService::new(deps, &root);

    let records = service.all_worktrees()?;
    if records.is_empty() {
        println!("no worktrees found");
        return Ok(());
    }

    let width = records.iter().map(|r| r.folder.len()).max().unwrap_or(0);
    for record in &records {
        if verbose {
            let score = deps.index.score(&record.full_path);
            println!(
                "  {:width$}  {}  {}  {}",
                record.folder.bold(),
                record.branch_name.cyan(),
                record.commit_hash.dimmed(),
                format!("z:{score:.1}").dimmed(),
            );
        } else {
            println!("  {:width$}  {}", record.folder.bold(), record.branch_name.cyan());
        }
    }

    Ok(())
}
