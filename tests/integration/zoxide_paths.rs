//! Index path compilation against a real filesystem

use std::fs;
use tempfile::TempDir;

use arbor::zoxide::{compile_paths, FsLister};

#[test]
fn test_root_first_even_with_no_patterns() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_string_lossy().to_string();

    let paths = compile_paths(&root, &[], &FsLister).unwrap();
    assert_eq!(paths, vec![root]);
}

#[test]
fn test_wildcard_expands_real_directories() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("services/api")).unwrap();
    fs::create_dir_all(dir.path().join("services/web")).unwrap();
    fs::create_dir_all(dir.path().join("docs")).unwrap();

    let root = dir.path().to_string_lossy().to_string();
    let patterns = vec!["services/*".to_string(), "docs".to_string()];
    let paths = compile_paths(&root, &patterns, &FsLister).unwrap();

    assert_eq!(
        paths,
        vec![
            root.clone(),
            format!("{root}/services/api"),
            format!("{root}/services/web"),
            format!("{root}/docs"),
        ]
    );
}

#[test]
fn test_missing_plain_folder_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_string_lossy().to_string();

    let patterns = vec!["nope".to_string()];
    let paths = compile_paths(&root, &patterns, &FsLister).unwrap();
    assert_eq!(paths, vec![root]);
}

#[test]
fn test_unreadable_wildcard_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_string_lossy().to_string();

    let patterns = vec!["missing/*".to_string()];
    assert!(compile_paths(&root, &patterns, &FsLister).is_err());
}
