//! `arbor add` and the shared add pipeline used by the TUI

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::deps::Deps;
use crate::git::{branch, determine_creation_args, worktree, AddDecisionInput};
use crate::sesh;
use crate::zoxide::{compile_paths, FsLister};

/// Everything one add invocation needs, from CLI flags or the TUI input line.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub branch: String,
    pub base: Option<String>,
    pub pull: bool,
    pub run_script: bool,
    pub cursor: bool,
    pub vscode: bool,
    /// Worktree-root override.
    pub directory: Option<PathBuf>,
    /// Explicit worktree folder name; defaults to the branch name.
    pub name: Option<String>,
    pub sesh: bool,
    pub sesh_target: Option<String>,
}

impl AddRequest {
    pub fn folder(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.branch)
    }

    pub fn wants_sesh(&self) -> bool {
        self.sesh || self.sesh_target.is_some()
    }
}

/// A completed add, ready for optional connect/open side effects.
#[derive(Debug)]
pub struct AddOutcome {
    pub worktree_path: PathBuf,
    pub folder: String,
}

/// The add pipeline: fresh branch queries, the creation decision matrix,
/// worktree materialization, index registration, then the optional post
/// script and editor launches. The sesh connect is left to the caller since
/// the TUI must restore the terminal first.
pub fn run_pipeline(deps: &Deps, root: &Path, request: &AddRequest) -> Result<AddOutcome> {
    anyhow::ensure!(!request.branch.is_empty(), "branch name must not be empty");

    let runner = deps.runner.as_ref();
    let bare = worktree::bare_path(root);

    branch::fetch(runner, &bare).context("fetch before branch queries failed")?;

    let base = request
        .base
        .clone()
        .unwrap_or_else(|| deps.config.default_base_branch.clone());

    let input = AddDecisionInput {
        new_branch_exists_locally: branch::local_branch_exists(runner, &bare, &request.branch),
        new_branch_exists_remotely: branch::remote_branch_exists(runner, &bare, &request.branch),
        base_branch_exists_locally: branch::local_branch_exists(runner, &bare, &base),
        pull_before_cutting_new_branch: request.pull,
        new_branch_name: request.branch.clone(),
        base_branch_name: base,
    };

    let creation_args = determine_creation_args(&input);
    let folder = request.folder().to_string();
    let worktree_path = worktree::add_worktree(runner, root, &folder, &creation_args)?;

    // An existing branch was checked out as-is; honor the pull flag by
    // pulling inside the fresh checkout.
    if request.pull && (input.new_branch_exists_locally || input.new_branch_exists_remotely) {
        if let Err(e) = branch::pull(runner, &worktree_path) {
            warn!("pull in new worktree failed: {e}");
        }
    }

    register_with_index(deps, &worktree_path);

    if request.run_script {
        if let Some(script) = &deps.config.post_add_script {
            crate::git::runner::run_checked(runner, "sh", &["-c", script], &worktree_path)
                .context("post-add script failed")?;
        }
    }

    let path_arg = worktree_path.to_string_lossy().to_string();
    if request.cursor {
        if let Err(e) = runner.run("cursor", &[path_arg.as_str()], root) {
            warn!("could not open cursor: {e}");
        }
    }
    if request.vscode {
        if let Err(e) = runner.run("code", &[path_arg.as_str()], root) {
            warn!("could not open vscode: {e}");
        }
    }

    Ok(AddOutcome {
        worktree_path,
        folder,
    })
}

fn register_with_index(deps: &Deps, worktree_path: &Path) {
    let root_str = worktree_path.to_string_lossy().to_string();
    let paths = match compile_paths(&root_str, &deps.config.zoxide_folders, &FsLister) {
        Ok(paths) => paths,
        Err(e) => {
            warn!("could not expand index paths for {root_str}: {e}");
            vec![root_str]
        }
    };

    for path in &paths {
        if let Err(e) = deps.index.add(path) {
            warn!("failed to register {path} with index: {e}");
        }
    }
}

pub fn execute(deps: &Deps, request: AddRequest) -> Result<()> {
    let root = match &request.directory {
        Some(dir) => dir.clone(),
        None => super::resolve_root(&deps.config)?,
    };

    let outcome = run_pipeline(deps, &root, &request)?;
    println!(
        "{} worktree {} at {}",
        "created".green(),
        outcome.folder.bold(),
        outcome.worktree_path.display()
    );

    if request.wants_sesh() {
        let target = request
            .sesh_target
            .clone()
            .unwrap_or_else(|| outcome.worktree_path.to_string_lossy().to_string());
        sesh::connect(deps.runner.as_ref(), &target, &root)?;
    }

    Ok(())
}
