//! Folder-keyed set operations between worktrees and branch name lists
//!
//! Matching is on the worktree's directory name, not its checked-out branch:
//! a worktree whose folder differs from its branch is treated as stale even
//! if the branch still exists remotely. Preserved intentionally.

use crate::git::WorktreeRecord;

/// Worktrees whose folder is absent from `remote_branches` (the stale set).
pub fn branch_no_match_list(
    remote_branches: &[String],
    worktrees: &[WorktreeRecord],
) -> Vec<WorktreeRecord> {
    worktrees
        .iter()
        .filter(|wt| !remote_branches.iter().any(|b| *b == wt.folder))
        .cloned()
        .collect()
}

/// Worktrees whose folder appears in `selected_names`, preserving the input
/// worktree order (not the selection order).
pub fn branch_match_list(
    selected_names: &[String],
    worktrees: &[WorktreeRecord],
) -> Vec<WorktreeRecord> {
    worktrees
        .iter()
        .filter(|wt| selected_names.iter().any(|n| *n == wt.folder))
        .cloned()
        .collect()
}
