//! `arbor clone` — set up a worktree root around a bare clone
//!
//! Layout after `arbor clone <url> platform`:
//!
//! ```text
//! platform/
//!   .bare/   <- bare repository (the shared object store)
//!   .git     <- link file: gitdir: ./.bare
//! ```

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use crate::deps::Deps;
use crate::git::runner::run_checked;
use crate::git::worktree::BARE_DIR;

pub fn execute(deps: &Deps, url: String, folder: Option<String>) -> Result<()> {
    let folder = folder.unwrap_or_else(|| default_folder(&url));
    let root = PathBuf::from(&folder);
    let bare = root.join(BARE_DIR);

    fs::create_dir_all(&root)
        .with_context(|| format!("Failed to create directory: {}", root.display()))?;

    let runner = deps.runner.as_ref();

    println!("Cloning {} into {}...", url.bold(), bare.display());
    run_checked(runner, "git", &["clone", "--bare", &url, BARE_DIR], &root)?;

    // Link file so plain git commands in the root resolve the bare repo.
    fs::write(root.join(".git"), format!("gitdir: ./{BARE_DIR}\n"))
        .context("Failed to write .git link file")?;

    // Bare clones do not fetch remote branches by default; fix the refspec
    // so reconciliation sees origin/* refs.
    run_checked(
        runner,
        "git",
        &[
            "config",
            "remote.origin.fetch",
            "+refs/heads/*:refs/remotes/origin/*",
        ],
        &bare,
    )?;
    run_checked(runner, "git", &["fetch", "--prune"], &bare)?;

    println!("{} worktree root ready at {}", "done:".green(), root.display());
    Ok(())
}

/// Derive a directory name from the clone URL.
fn default_folder(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .trim_end_matches(".git")
        .to_string()
}
