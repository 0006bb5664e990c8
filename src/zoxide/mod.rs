//! Directory-jump index integration
//!
//! Wraps the zoxide CLI behind the [`DirIndex`] trait. Registration is
//! idempotent on zoxide's side, so duplicate adds are tolerated; score
//! queries for unknown paths are "zero", not an error.

pub mod paths;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::git::runner::{run_checked, CommandRunner};

pub use paths::{compile_paths, FsLister, ListFolders};

/// One scored entry from the index.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPath {
    pub score: f64,
    pub path: String,
}

pub trait DirIndex: Send + Sync {
    fn add(&self, path: &str) -> Result<()>;
    fn remove(&self, path: &str) -> Result<()>;

    /// Score for a single path; unknown paths score 0.0.
    fn score(&self, path: &str) -> f64;

    /// All indexed paths under `root`, highest score first.
    fn list_under(&self, root: &str) -> Result<Vec<ScoredPath>>;
}

/// Production index backed by the `zoxide` binary.
pub struct Zoxide {
    runner: Arc<dyn CommandRunner>,
    cwd: std::path::PathBuf,
}

impl Zoxide {
    pub fn new(runner: Arc<dyn CommandRunner>, cwd: &Path) -> Self {
        Self {
            runner,
            cwd: cwd.to_path_buf(),
        }
    }
}

impl DirIndex for Zoxide {
    fn add(&self, path: &str) -> Result<()> {
        run_checked(self.runner.as_ref(), "zoxide", &["add", path], &self.cwd)?;
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        run_checked(self.runner.as_ref(), "zoxide", &["remove", path], &self.cwd)?;
        Ok(())
    }

    fn score(&self, path: &str) -> f64 {
        // Unknown paths make `zoxide query` exit non-zero; that is a zero
        // score, not an error.
        self.runner
            .run("zoxide", &["query", "--score", path], &self.cwd)
            .ok()
            .filter(|out| out.success)
            .and_then(|out| parse_score_line(&out.stdout).map(|(score, _)| score))
            .unwrap_or(0.0)
    }

    fn list_under(&self, root: &str) -> Result<Vec<ScoredPath>> {
        let stdout = run_checked(
            self.runner.as_ref(),
            "zoxide",
            &["query", "--list", "--score"],
            &self.cwd,
        )?;

        let prefix = format!("{}/", root.trim_end_matches('/'));
        let mut entries: Vec<ScoredPath> = stdout
            .lines()
            .filter_map(parse_score_line)
            .filter(|(_, path)| *path == root || path.starts_with(&prefix))
            .map(|(score, path)| ScoredPath { score, path })
            .collect();

        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(entries)
    }
}

/// Parse one `<score> <path>` line of `zoxide query --score` output.
fn parse_score_line(line: &str) -> Option<(f64, String)> {
    let trimmed = line.trim();
    let (score, path) = trimmed.split_once(char::is_whitespace)?;
    Some((score.parse().ok()?, path.trim().to_string()))
}
