//! Session state for the interactive view
//!
//! The modal state is one tagged enum with exactly one active mode, so
//! illegal combinations (say, an add input while a delete is in flight) are
//! unrepresentable. Transitions happen on key events and on background-task
//! completion messages.

use crate::commands::add::AddRequest;
use crate::git::WorktreeRecord;
use crate::zoxide::ScoredPath;

use super::task::TaskHandle;

/// Message posted by a finished add task.
pub type AddCompletion = Result<CompletedAdd, String>;

/// Message posted by a finished delete task.
pub type DeleteCompletion = Result<(), String>;

#[derive(Debug, Clone)]
pub struct CompletedAdd {
    pub folder: String,
    pub worktree_path: String,
    /// Target to hand to sesh after the terminal is restored.
    pub sesh_target: Option<String>,
}

/// Exactly one mode is active at a time.
pub enum Mode {
    /// Table navigation; the initial state.
    Browsing,
    /// Free-text add entry; `error` carries the previous attempt's failure.
    AddInput { buffer: String, error: Option<String> },
    /// Add pipeline running in the background.
    AddInFlight {
        task: TaskHandle<AddCompletion>,
        buffer: String,
    },
    /// Worktree removal running in the background.
    DeleteInFlight {
        task: TaskHandle<DeleteCompletion>,
        record: WorktreeRecord,
        delete_branch: bool,
    },
    /// A delete failed (typically a dirty tree); offer a forced retry.
    DeleteConfirm {
        record: WorktreeRecord,
        delete_branch: bool,
        error: String,
    },
    /// Directory-index entries under the selected worktree.
    DirectoryPopup {
        entries: Vec<ScoredPath>,
        selected: usize,
    },
}

/// Parse one add-input line into an [`AddRequest`].
///
/// Grammar: one bare token is the branch name; everything else is a flag.
/// Recognized flags: `-p/--pull`, `-c/--cursor`, `-v/--vscode`,
/// `-x/--script`, `-s/--sesh`, `-b/--base <branch>`, `-d/--directory <dir>`,
/// `-n/--name <folder>`, `--sesh-target <target>`.
pub fn parse_add_line(line: &str) -> Result<AddRequest, String> {
    let mut request = AddRequest::default();
    let mut tokens = line.split_whitespace().peekable();

    while let Some(token) = tokens.next() {
        match token {
            "-p" | "--pull" => request.pull = true,
            "-c" | "--cursor" => request.cursor = true,
            "-v" | "--vscode" => request.vscode = true,
            "-x" | "--script" => request.run_script = true,
            "-s" | "--sesh" => request.sesh = true,
            "-b" | "--base" => {
                let value = tokens.next().ok_or("missing value for --base")?;
                request.base = Some(value.to_string());
            }
            "-d" | "--directory" => {
                let value = tokens.next().ok_or("missing value for --directory")?;
                request.directory = Some(value.into());
            }
            "-n" | "--name" => {
                let value = tokens.next().ok_or("missing value for --name")?;
                request.name = Some(value.to_string());
            }
            "--sesh-target" => {
                let value = tokens.next().ok_or("missing value for --sesh-target")?;
                request.sesh_target = Some(value.to_string());
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown flag: {flag}"));
            }
            branch => {
                if !request.branch.is_empty() {
                    return Err(format!("unexpected argument: {branch}"));
                }
                request.branch = branch.to_string();
            }
        }
    }

    if request.branch.is_empty() {
        return Err("branch name required".to_string());
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_branch() {
        let request = parse_add_line("hotfix").unwrap();
        assert_eq!(request.branch, "hotfix");
        assert!(!request.pull);
        assert!(request.base.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let request =
            parse_add_line("hotfix -p -c -v -x -s -b prod -d /tmp/wt -n fix --sesh-target api")
                .unwrap();
        assert_eq!(request.branch, "hotfix");
        assert!(request.pull && request.cursor && request.vscode);
        assert!(request.run_script && request.sesh);
        assert_eq!(request.base.as_deref(), Some("prod"));
        assert_eq!(request.name.as_deref(), Some("fix"));
        assert_eq!(request.sesh_target.as_deref(), Some("api"));
        assert_eq!(
            request.directory.as_deref(),
            Some(std::path::Path::new("/tmp/wt"))
        );
    }

    #[test]
    fn test_parse_branch_position_is_free() {
        let request = parse_add_line("-p hotfix").unwrap();
        assert_eq!(request.branch, "hotfix");
        assert!(request.pull);
    }

    #[test]
    fn test_parse_rejects_missing_branch() {
        assert!(parse_add_line("").is_err());
        assert!(parse_add_line("-p").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        let err = parse_add_line("hotfix --frobnicate").unwrap_err();
        assert!(err.contains("unknown flag"));
    }

    #[test]
    fn test_parse_rejects_second_branch() {
        let err = parse_add_line("one two").unwrap_err();
        assert!(err.contains("unexpected argument"));
    }

    #[test]
    fn test_parse_rejects_dangling_value_flag() {
        let err = parse_add_line("hotfix -b").unwrap_err();
        assert!(err.contains("missing value"));
    }
}
