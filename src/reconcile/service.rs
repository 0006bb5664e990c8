//! Reconciliation orchestration
//!
//! Drives fetch -> parse -> diff -> select -> remove for both the batch
//! `clean` flow and the `delete` flow. Every operation re-queries fresh
//! state; nothing is cached between invocations.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::warn;

use crate::deps::Deps;
use crate::git::{branch, parser, worktree, RemoveError, WorktreeRecord};
use crate::zoxide::{compile_paths, FsLister};

use super::matcher;

#[derive(Debug, Clone, Copy, Default)]
pub struct RemovalOptions {
    pub force: bool,
    pub delete_branches: bool,
}

/// Outcome of a removal batch. Per-item failures do not abort the batch.
#[derive(Debug, Default)]
pub struct RemovalReport {
    pub removed: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub branches_deleted: usize,
}

pub struct ReconciliationService<'a> {
    deps: &'a Deps,
    root: PathBuf,
}

impl<'a> ReconciliationService<'a> {
    pub fn new(deps: &'a Deps, root: &Path) -> Self {
        Self {
            deps,
            root: root.to_path_buf(),
        }
    }

    /// All worktrees, most recently used first.
    pub fn all_worktrees(&self) -> Result<Vec<WorktreeRecord>> {
        let mut records = worktree::list_worktrees(self.deps.runner.as_ref(), &self.root)?;
        sort_most_recent_first(&mut records);
        Ok(records)
    }

    /// Worktrees whose folder no longer matches any remote branch, most
    /// recently used first. Fetches first so the remote set is current.
    pub fn stale_worktrees(&self) -> Result<Vec<WorktreeRecord>> {
        let bare = worktree::bare_path(&self.root);
        branch::fetch(self.deps.runner.as_ref(), &bare)?;

        let records = worktree::list_worktrees(self.deps.runner.as_ref(), &self.root)?;
        let remote = branch::list_remote_branches(self.deps.runner.as_ref(), &bare)?;
        let remote = parser::remove_origin_prefix(remote);

        let mut stale = matcher::branch_no_match_list(&remote, &records);
        sort_most_recent_first(&mut stale);
        Ok(stale)
    }

    /// Resolve a selection back to records and remove them.
    ///
    /// When `preselected` is `None` the user picks via the prompter; CLI
    /// callers pass the names straight through.
    pub fn select_and_remove(
        &self,
        candidates: &[WorktreeRecord],
        preselected: Option<&[String]>,
        title: &str,
        options: RemovalOptions,
    ) -> Result<RemovalReport> {
        let names: Vec<String> = match preselected {
            Some(names) => names.to_vec(),
            None => {
                let folders: Vec<String> =
                    candidates.iter().map(|wt| wt.folder.clone()).collect();
                if folders.is_empty() {
                    return Ok(RemovalReport::default());
                }
                self.deps.prompter.select_many(title, &folders)?
            }
        };

        let selected = matcher::branch_match_list(&names, candidates);
        self.remove_records(&selected, options)
    }

    /// Remove each record's worktree and its index registrations, tolerating
    /// individual failures. Branch-ref deletion is gated by one confirmation
    /// covering all of them; a "no" skips every ref.
    pub fn remove_records(
        &self,
        records: &[WorktreeRecord],
        options: RemovalOptions,
    ) -> Result<RemovalReport> {
        let mut report = RemovalReport::default();

        for record in records {
            // Compile index paths before removal; afterwards the directories
            // are gone and wildcard expansion has nothing to list.
            let index_paths = compile_paths(
                &record.full_path,
                &self.deps.config.zoxide_folders,
                &FsLister,
            )
            .unwrap_or_else(|e| {
                warn!("could not expand index paths for {}: {e}", record.folder);
                vec![record.full_path.clone()]
            });

            match worktree::remove_worktree(
                self.deps.runner.as_ref(),
                &self.root,
                record,
                options.force,
            ) {
                Ok(()) => {
                    for path in &index_paths {
                        if let Err(e) = self.deps.index.remove(path) {
                            warn!("failed to deregister {path}: {e}");
                        }
                    }
                    println!("  {} {}", "removed".green(), record.folder);
                    report.removed.push(record.folder.clone());
                }
                Err(RemoveError::DirtyTree { folder, details }) => {
                    eprintln!("  {} {folder}: {details}", "skipped".yellow());
                    report.failed.push((folder, details));
                }
                Err(RemoveError::Other(e)) => {
                    eprintln!("  {} {}: {e}", "failed".red(), record.folder);
                    report.failed.push((record.folder.clone(), e.to_string()));
                }
            }
        }

        if options.delete_branches && !report.removed.is_empty() {
            let removed_records: Vec<&WorktreeRecord> = records
                .iter()
                .filter(|r| report.removed.contains(&r.folder))
                .collect();

            let prompt = format!(
                "Also delete {} local branch ref(s)?",
                removed_records.len()
            );
            if self.deps.prompter.confirm(&prompt)? {
                for record in removed_records {
                    match branch::delete_branch(
                        self.deps.runner.as_ref(),
                        &worktree::bare_path(&self.root),
                        &record.branch_name,
                    ) {
                        Ok(()) => report.branches_deleted += 1,
                        Err(e) => {
                            warn!("failed to delete branch {}: {e}", record.branch_name);
                        }
                    }
                }
            }
        }

        Ok(report)
    }
}

/// Sort by filesystem modification time of the worktree path, newest first.
/// A path that cannot be stat'ed sorts to the end and the error is logged,
/// not raised.
pub fn sort_most_recent_first(records: &mut [WorktreeRecord]) {
    sort_by_mtime(records, |path| {
        match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(mtime) => Some(mtime),
            Err(e) => {
                warn!("could not stat {path}: {e}");
                None
            }
        }
    });
}

fn sort_by_mtime<F>(records: &mut [WorktreeRecord], stat: F)
where
    F: Fn(&str) -> Option<SystemTime>,
{
    let mut keyed: Vec<(Option<SystemTime>, WorktreeRecord)> = records
        .iter()
        .map(|r| (stat(&r.full_path), r.clone()))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    for (slot, (_, record)) in records.iter_mut().zip(keyed) {
        *slot = record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::git::runner::testing::ScriptedRunner;
    use crate::prompt::testing::ScriptedPrompter;
    use crate::prompt::Prompter;
    use crate::zoxide::{DirIndex, ScoredPath};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct FakeIndex {
        removed: Mutex<Vec<String>>,
    }

    impl FakeIndex {
        fn new() -> Self {
            Self {
                removed: Mutex::new(Vec::new()),
            }
        }
    }

    impl DirIndex for FakeIndex {
        fn add(&self, _path: &str) -> Result<()> {
            Ok(())
        }
        fn remove(&self, path: &str) -> Result<()> {
            self.removed.lock().unwrap().push(path.to_string());
            Ok(())
        }
        fn score(&self, _path: &str) -> f64 {
            0.0
        }
        fn list_under(&self, _root: &str) -> Result<Vec<ScoredPath>> {
            Ok(Vec::new())
        }
    }

    fn record(folder: &str) -> WorktreeRecord {
        WorktreeRecord {
            full_path: format!("/x/{folder}"),
            folder: folder.to_string(),
            branch_name: folder.to_string(),
            commit_hash: "abc".to_string(),
        }
    }

    fn deps(runner: ScriptedRunner, prompter: ScriptedPrompter) -> Deps {
        Deps {
            runner: Arc::new(runner),
            index: Arc::new(FakeIndex::new()),
            prompter: Arc::new(prompter) as Arc<dyn Prompter>,
            config: Config::default(),
        }
    }

    #[test]
    fn test_stale_worktrees_diffs_against_remote() {
        let runner = ScriptedRunner::new()
            .respond(
                "git worktree list",
                true,
                "/x/main abc [main]\n/x/feature def [feature]\n/x/.bare (bare)\n",
                "",
            )
            .respond(
                "git branch -r --no-color",
                true,
                "  origin/main\n  origin/develop\n",
                "",
            );
        let deps = deps(runner, ScriptedPrompter::new(vec![], vec![]));
        let service = ReconciliationService::new(&deps, Path::new("/x"));

        let stale = service.stale_worktrees().unwrap();
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].folder, "feature");
    }

    #[test]
    fn test_remove_records_continues_past_failure() {
        let runner = ScriptedRunner::new().respond(
            "git worktree remove /x/bad",
            false,
            "",
            "fatal: unable to remove",
        );
        let deps = deps(runner, ScriptedPrompter::new(vec![], vec![]));
        let service = ReconciliationService::new(&deps, Path::new("/x"));

        let report = service
            .remove_records(&[record("bad"), record("good")], RemovalOptions::default())
            .unwrap();

        assert_eq!(report.removed, vec!["good"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "bad");
    }

    #[test]
    fn test_remove_records_targets_listed_path() {
        let runner = Arc::new(ScriptedRunner::new());
        let deps = Deps {
            runner: runner.clone(),
            index: Arc::new(FakeIndex::new()),
            prompter: Arc::new(ScriptedPrompter::new(vec![], vec![])),
            config: Config::default(),
        };
        let service = ReconciliationService::new(&deps, Path::new("/x"));

        // Worktree created elsewhere via a directory override; removal must
        // use the path from the listing, not a sibling of the root.
        let outside = WorktreeRecord {
            full_path: "/elsewhere/feature".to_string(),
            folder: "feature".to_string(),
            branch_name: "feature".to_string(),
            commit_hash: "abc".to_string(),
        };
        let report = service
            .remove_records(&[outside], RemovalOptions::default())
            .unwrap();

        assert_eq!(report.removed, vec!["feature"]);
        assert!(runner
            .calls()
            .contains(&"git worktree remove /elsewhere/feature".to_string()));
    }

    #[test]
    fn test_branch_deletion_is_all_or_nothing_on_decline() {
        let runner = ScriptedRunner::new();
        let deps = deps(runner, ScriptedPrompter::new(vec![], vec![false]));
        let service = ReconciliationService::new(&deps, Path::new("/x"));

        let report = service
            .remove_records(
                &[record("a"), record("b")],
                RemovalOptions {
                    force: false,
                    delete_branches: true,
                },
            )
            .unwrap();

        assert_eq!(report.removed.len(), 2);
        assert_eq!(report.branches_deleted, 0);
    }

    #[test]
    fn test_branch_deletion_covers_all_on_accept() {
        let runner = ScriptedRunner::new();
        let deps = deps(runner, ScriptedPrompter::new(vec![], vec![true]));
        let service = ReconciliationService::new(&deps, Path::new("/x"));

        let report = service
            .remove_records(
                &[record("a"), record("b")],
                RemovalOptions {
                    force: false,
                    delete_branches: true,
                },
            )
            .unwrap();

        assert_eq!(report.branches_deleted, 2);
    }

    #[test]
    fn test_select_and_remove_resolves_selection_in_worktree_order() {
        let runner = ScriptedRunner::new();
        let prompter =
            ScriptedPrompter::new(vec![vec!["c".to_string(), "a".to_string()]], vec![]);
        let deps = deps(runner, prompter);
        let service = ReconciliationService::new(&deps, Path::new("/x"));

        let report = service
            .select_and_remove(
                &[record("a"), record("b"), record("c")],
                None,
                "Select worktrees",
                RemovalOptions::default(),
            )
            .unwrap();

        assert_eq!(report.removed, vec!["a", "c"]);
    }

    #[test]
    fn test_sort_by_mtime_newest_first_unstatable_last() {
        let base = SystemTime::UNIX_EPOCH;
        let mut records = vec![record("old"), record("missing"), record("new")];

        sort_by_mtime(&mut records, |path| match path {
            "/x/old" => Some(base + Duration::from_secs(100)),
            "/x/new" => Some(base + Duration::from_secs(200)),
            _ => None,
        });

        let folders: Vec<&str> = records.iter().map(|r| r.folder.as_str()).collect();
        assert_eq!(folders, vec!["new", "old", "missing"]);
    }
}
