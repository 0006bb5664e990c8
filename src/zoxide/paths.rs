//! Registration path compilation
//!
//! Expands a worktree root plus the configured folder patterns into the set
//! of paths to register with the directory-jump index. A trailing `*` in a
//! pattern's final segment expands one directory level; everything else is
//! appended as-is after an existence check.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

/// Directory-listing capability, substitutable in tests.
pub trait ListFolders {
    /// Names of the immediate subdirectories of `path`.
    fn list_folders(&self, path: &Path) -> Result<Vec<String>>;

    fn exists(&self, path: &Path) -> bool;
}

/// Production lister backed by `std::fs`.
pub struct FsLister;

impl ListFolders for FsLister {
    fn list_folders(&self, path: &Path) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(path)
            .with_context(|| format!("Failed to read directory: {}", path.display()))?;

        let mut folders = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.path().is_dir() {
                folders.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        folders.sort();
        Ok(folders)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Compile the index-registration paths for one worktree.
///
/// - `root` itself is always the first result.
/// - A pattern whose final `/`-segment ends in `*` expands to every entry of
///   `root/<prefix>` (one level only; entries are not re-expanded).
/// - Any other pattern is appended if `root/<pattern>` exists; a missing
///   path is warned about and skipped.
/// - Listing failures propagate so the caller can tell the user a configured
///   folder is unreadable.
///
/// No de-duplication: the downstream index add is idempotent.
pub fn compile_paths(
    root: &str,
    patterns: &[String],
    lister: &dyn ListFolders,
) -> Result<Vec<String>> {
    let mut paths = vec![root.to_string()];

    for pattern in patterns {
        let segments: Vec<&str> = pattern.split('/').collect();
        let last = segments.last().copied().unwrap_or("");

        if last.ends_with('*') {
            let prefix = segments[..segments.len() - 1].join("/");
            let dir = if prefix.is_empty() {
                root.to_string()
            } else {
                format!("{root}/{prefix}")
            };

            for entry in lister.list_folders(Path::new(&dir))? {
                paths.push(format!("{dir}/{entry}"));
            }
        } else {
            let candidate = format!("{root}/{pattern}");
            if lister.exists(Path::new(&candidate)) {
                paths.push(candidate);
            } else {
                warn!("configured folder does not exist, skipping: {candidate}");
            }
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::collections::HashMap;

    struct FakeLister {
        folders: HashMap<String, Vec<String>>,
        existing: Vec<String>,
        fail_on: Option<String>,
    }

    impl FakeLister {
        fn new() -> Self {
            Self {
                folders: HashMap::new(),
                existing: Vec::new(),
                fail_on: None,
            }
        }

        fn with_folders(mut self, path: &str, entries: &[&str]) -> Self {
            self.folders.insert(
                path.to_string(),
                entries.iter().map(|s| s.to_string()).collect(),
            );
            self
        }

        fn with_existing(mut self, path: &str) -> Self {
            self.existing.push(path.to_string());
            self
        }

        fn failing_on(mut self, path: &str) -> Self {
            self.fail_on = Some(path.to_string());
            self
        }
    }

    impl ListFolders for FakeLister {
        fn list_folders(&self, path: &Path) -> Result<Vec<String>> {
            let key = path.to_string_lossy().to_string();
            if self.fail_on.as_deref() == Some(key.as_str()) {
                bail!("permission denied: {key}");
            }
            Ok(self.folders.get(&key).cloned().unwrap_or_default())
        }

        fn exists(&self, path: &Path) -> bool {
            self.existing.contains(&path.to_string_lossy().to_string())
        }
    }

    #[test]
    fn test_root_is_always_first_with_empty_patterns() {
        let paths = compile_paths("/x/dev", &[], &FakeLister::new()).unwrap();
        assert_eq!(paths, vec!["/x/dev"]);
    }

    #[test]
    fn test_plain_pattern_appended_when_it_exists() {
        let lister = FakeLister::new().with_existing("/x/dev/services/api");
        let patterns = vec!["services/api".to_string()];
        let paths = compile_paths("/x/dev", &patterns, &lister).unwrap();
        assert_eq!(paths, vec!["/x/dev", "/x/dev/services/api"]);
    }

    #[test]
    fn test_missing_plain_pattern_skipped() {
        let patterns = vec!["does/not/exist".to_string()];
        let paths = compile_paths("/x/dev", &patterns, &FakeLister::new()).unwrap();
        assert_eq!(paths, vec!["/x/dev"]);
    }

    #[test]
    fn test_wildcard_expands_one_level() {
        let lister = FakeLister::new().with_folders("/x/dev/packages", &["core", "web"]);
        let patterns = vec!["packages/*".to_string()];
        let paths = compile_paths("/x/dev", &patterns, &lister).unwrap();
        assert_eq!(
            paths,
            vec!["/x/dev", "/x/dev/packages/core", "/x/dev/packages/web"]
        );
    }

    #[test]
    fn test_bare_wildcard_lists_root() {
        let lister = FakeLister::new().with_folders("/x/dev", &["a", "b"]);
        let patterns = vec!["*".to_string()];
        let paths = compile_paths("/x/dev", &patterns, &lister).unwrap();
        assert_eq!(paths, vec!["/x/dev", "/x/dev/a", "/x/dev/b"]);
    }

    #[test]
    fn test_listing_failure_propagates() {
        let lister = FakeLister::new().failing_on("/x/dev/gone");
        let patterns = vec!["gone/*".to_string()];
        assert!(compile_paths("/x/dev", &patterns, &lister).is_err());
    }

    #[test]
    fn test_no_deduplication() {
        let lister = FakeLister::new().with_existing("/x/dev/api");
        let patterns = vec!["api".to_string(), "api".to_string()];
        let paths = compile_paths("/x/dev", &patterns, &lister).unwrap();
        assert_eq!(paths, vec!["/x/dev", "/x/dev/api", "/x/dev/api"]);
    }
}
