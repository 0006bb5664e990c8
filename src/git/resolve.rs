//! Creation-argument resolution
//!
//! The decision matrix that turns branch-existence flags into the exact
//! argument vector for `git worktree add`. This table is the single source
//! of truth for creation semantics; callers append the vector verbatim.

/// Inputs to the creation decision, built once per add invocation from fresh
/// branch queries and consumed exactly once.
#[derive(Debug, Clone)]
pub struct AddDecisionInput {
    pub new_branch_name: String,
    pub base_branch_name: String,
    pub new_branch_exists_locally: bool,
    pub new_branch_exists_remotely: bool,
    pub base_branch_exists_locally: bool,
    pub pull_before_cutting_new_branch: bool,
}

/// Resolve the argument tail for `git worktree add`, first match wins:
///
/// 1. new branch exists (locally or remotely) -> plain checkout, no `-b`
/// 2. base exists locally and a pull was requested -> cut from the fresh
///    remote tip, explicitly untracked
/// 3. base exists locally -> cut from the local tip
/// 4. otherwise -> cut from the remote ref, explicitly untracked
///
/// Existence of the new branch always dominates pull/base considerations.
/// Blank names are not validated here; they fall through to case 4.
pub fn determine_creation_args(input: &AddDecisionInput) -> Vec<String> {
    if input.new_branch_exists_locally || input.new_branch_exists_remotely {
        return vec![input.new_branch_name.clone()];
    }

    if input.base_branch_exists_locally && input.pull_before_cutting_new_branch {
        return vec![
            "-b".to_string(),
            input.new_branch_name.clone(),
            format!("origin/{}", input.base_branch_name),
            "--no-track".to_string(),
        ];
    }

    if input.base_branch_exists_locally {
        return vec![
            "-b".to_string(),
            input.new_branch_name.clone(),
            input.base_branch_name.clone(),
        ];
    }

    vec![
        "-b".to_string(),
        input.new_branch_name.clone(),
        format!("origin/{}", input.base_branch_name),
        "--no-track".to_string(),
    ]
}
