//! Worktree lifecycle commands
//!
//! Create, remove, and list worktrees against the bare repository at
//! `<root>/.bare`, where every sibling directory of `.bare` is a checkout.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::parser::{parse_worktree_listing, WorktreeRecord};
use super::runner::{run_checked, CommandRunner};

/// Name of the bare repository directory inside the worktree root.
pub const BARE_DIR: &str = ".bare";

/// Removal failure the interactive flow must branch on: a dirty tree is
/// turned into a forced-retry confirmation, anything else is terminal.
#[derive(Debug, Error)]
pub enum RemoveError {
    #[error("worktree '{folder}' has local changes: {details}")]
    DirtyTree { folder: String, details: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Path of the bare repository for a worktree root.
pub fn bare_path(root: &Path) -> PathBuf {
    root.join(BARE_DIR)
}

/// Locate the worktree root by walking up from `start` until a directory
/// containing `.bare` is found.
pub fn find_worktree_root(start: &Path) -> Result<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(BARE_DIR).is_dir() {
            return Ok(dir.to_path_buf());
        }
        current = dir.parent();
    }
    bail!(
        "no worktree root found: no `{BARE_DIR}` directory above {}",
        start.display()
    )
}

/// List all worktrees known to the bare repository.
pub fn list_worktrees(runner: &dyn CommandRunner, root: &Path) -> Result<Vec<WorktreeRecord>> {
    let stdout = run_checked(runner, "git", &["worktree", "list"], &bare_path(root))?;
    Ok(parse_worktree_listing(&stdout))
}

/// Create a worktree at `<root>/<folder>` using the resolver-produced
/// argument tail, then write the link file pointing the checkout at the
/// bare repository's worktree bookkeeping directory.
pub fn add_worktree(
    runner: &dyn CommandRunner,
    root: &Path,
    folder: &str,
    creation_args: &[String],
) -> Result<PathBuf> {
    let worktree_path = root.join(folder);
    if worktree_path.exists() {
        bail!("worktree already exists at {}", worktree_path.display());
    }

    let path_str = worktree_path.to_string_lossy().to_string();
    let mut args = vec!["worktree", "add", path_str.as_str()];
    args.extend(creation_args.iter().map(String::as_str));

    run_checked(runner, "git", &args, &bare_path(root))?;

    write_gitdir_link(&worktree_path, &bare_path(root), folder)?;

    Ok(worktree_path)
}

/// Write `<worktree>/.git` pointing at `<bare>/worktrees/<folder>`.
///
/// Overwrites the file git created so checkouts beside the bare repository
/// resolve their common directory correctly.
pub fn write_gitdir_link(worktree_path: &Path, bare: &Path, folder: &str) -> Result<()> {
    let target = bare.join("worktrees").join(folder);
    let contents = format!("gitdir: {}\n", target.display());
    fs::write(worktree_path.join(".git"), contents).with_context(|| {
        format!(
            "Failed to write .git link file in {}",
            worktree_path.display()
        )
    })
}

/// Remove a worktree.
///
/// The removal targets the record's recorded path, which may live outside
/// the worktree root when the worktree was created with a directory
/// override; the folder name is only a display key. A refusal caused by
/// modified or untracked files is reported as [`RemoveError::DirtyTree`] so
/// callers can offer a forced retry.
pub fn remove_worktree(
    runner: &dyn CommandRunner,
    root: &Path,
    record: &WorktreeRecord,
    force: bool,
) -> std::result::Result<(), RemoveError> {
    let mut args = vec!["worktree", "remove"];
    if force {
        args.push("--force");
    }
    args.push(record.full_path.as_str());

    let output = runner
        .run("git", &args, &bare_path(root))
        .map_err(RemoveError::Other)?;

    if !output.success {
        let stderr = output.stderr.trim().to_string();
        if stderr.contains("contains modified or untracked files")
            || stderr.contains("use --force")
        {
            return Err(RemoveError::DirtyTree {
                folder: record.folder.clone(),
                details: stderr,
            });
        }
        return Err(RemoveError::Other(anyhow::anyhow!(
            "git worktree remove failed: {stderr}"
        )));
    }

    Ok(())
}
