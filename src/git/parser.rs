//! Listing output parsing
//!
//! Parses `git worktree list` output into structured records and normalizes
//! remote branch names.

/// Parsed worktree information from `git worktree list`.
///
/// `folder` is always derived from `full_path` (its last `/` segment),
/// never supplied independently. Records are built fresh on every parse and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeRecord {
    pub full_path: String,
    pub folder: String,
    pub branch_name: String,
    pub commit_hash: String,
}

/// Parse `git worktree list` output.
///
/// Example input:
/// ```text
/// /repos/platform/development  94dbf6  [dev_fix]
/// /repos/platform/.bare        (bare)
/// ```
///
/// Each line is whitespace-tokenized; lines with fewer than three tokens are
/// skipped without error. The listing format has structurally short rows (the
/// bare-repository line, a trailing blank) that are not worktrees, so the
/// lenient policy is deliberate.
pub fn parse_worktree_listing(output: &str) -> Vec<WorktreeRecord> {
    let mut records = Vec::new();

    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            continue;
        }

        let full_path = tokens[0].to_string();
        let folder = full_path
            .rsplit('/')
            .next()
            .unwrap_or(full_path.as_str())
            .to_string();
        let branch_name = tokens[2]
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();

        records.push(WorktreeRecord {
            full_path,
            folder,
            branch_name,
            commit_hash: tokens[1].to_string(),
        });
    }

    records
}

/// Strip a literal `origin/` prefix (first occurrence only) and surrounding
/// whitespace from every branch name, preserving order.
///
/// Idempotent: names already without the prefix pass through unchanged.
pub fn remove_origin_prefix<I, S>(branches: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    branches
        .into_iter()
        .map(|branch| {
            let trimmed = branch.as_ref().trim();
            trimmed
                .strip_prefix("origin/")
                .unwrap_or(trimmed)
                .to_string()
        })
        .collect()
}
