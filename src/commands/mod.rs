//! Subcommand implementations
//! One module per CLI subcommand; each `execute` prints user-facing output
//! and returns an error for the process to exit non-zero on.

pub mod add;
pub mod clean;
pub mod clone;
pub mod delete;
pub mod list;
pub mod ui;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::git::worktree::find_worktree_root;

/// Resolve the worktree root: explicit config override first, otherwise walk
/// up from the current directory to the first `.bare` parent.
pub fn resolve_root(config: &Config) -> Result<PathBuf> {
    if let Some(root) = &config.worktree_root {
        return Ok(root.clone());
    }
    let cwd = std::env::current_dir()?;
    find_worktree_root(&cwd)
}
