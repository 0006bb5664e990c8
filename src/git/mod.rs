//! Git operations for arbor worktree management
//!
//! This module provides:
//! - The command-runner boundary shared by every external process call
//! - Worktree/branch listing parsers
//! - The branch-existence decision matrix for worktree creation
//! - Worktree and branch lifecycle commands against the bare repository

pub mod branch;
pub mod parser;
pub mod resolve;
pub mod runner;
pub mod worktree;

pub use parser::{parse_worktree_listing, remove_origin_prefix, WorktreeRecord};
pub use resolve::{determine_creation_args, AddDecisionInput};
pub use runner::{CommandRunner, ProcessRunner, RunOutput};
pub use worktree::RemoveError;

/// Check that git is available on PATH.
pub fn check_git_available() -> anyhow::Result<()> {
    which::which("git").map_err(|_| anyhow::anyhow!("git not found on PATH"))?;
    Ok(())
}
