//! Branch queries and operations against the bare repository

use anyhow::Result;
use std::path::Path;

use super::runner::{run_bool, run_checked, CommandRunner};

/// List remote branch names, `origin/`-prefixed, one per line.
///
/// The `origin/HEAD -> origin/main` pointer line is dropped; everything else
/// is passed through for [`crate::git::remove_origin_prefix`].
pub fn list_remote_branches(runner: &dyn CommandRunner, repo: &Path) -> Result<Vec<String>> {
    let stdout = run_checked(runner, "git", &["branch", "-r", "--no-color"], repo)?;
    Ok(stdout
        .lines()
        .filter(|line| !line.contains("->"))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Check if a branch exists locally.
pub fn local_branch_exists(runner: &dyn CommandRunner, repo: &Path, name: &str) -> bool {
    let ref_path = format!("refs/heads/{name}");
    run_bool(runner, "git", &["rev-parse", "--verify", &ref_path], repo)
}

/// Check if a branch exists on the origin remote.
pub fn remote_branch_exists(runner: &dyn CommandRunner, repo: &Path, name: &str) -> bool {
    let ref_path = format!("refs/remotes/origin/{name}");
    run_bool(runner, "git", &["rev-parse", "--verify", &ref_path], repo)
}

/// Delete a local branch ref.
pub fn delete_branch(runner: &dyn CommandRunner, repo: &Path, name: &str) -> Result<()> {
    run_checked(runner, "git", &["branch", "-D", name], repo)?;
    Ok(())
}

/// Fetch from origin so existence queries and stale diffs see fresh state.
pub fn fetch(runner: &dyn CommandRunner, repo: &Path) -> Result<()> {
    run_checked(runner, "git", &["fetch", "--prune"], repo)?;
    Ok(())
}

/// Pull inside a checked-out worktree.
pub fn pull(runner: &dyn CommandRunner, worktree_path: &Path) -> Result<()> {
    run_checked(runner, "git", &["pull"], worktree_path)?;
    Ok(())
}
