//! Bare-repo layout helpers and config loading

use std::fs;
use tempfile::TempDir;

use arbor::config::Config;
use arbor::git::worktree::{bare_path, find_worktree_root, write_gitdir_link, BARE_DIR};

#[test]
fn test_root_discovery_from_inside_a_worktree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("platform");
    fs::create_dir_all(root.join(BARE_DIR)).unwrap();
    let deep = root.join("feature/src/lib");
    fs::create_dir_all(&deep).unwrap();

    assert_eq!(find_worktree_root(&deep).unwrap(), root);
}

#[test]
fn test_link_file_points_into_bare_bookkeeping() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let worktree = root.join("hotfix");
    fs::create_dir_all(&worktree).unwrap();

    write_gitdir_link(&worktree, &bare_path(root), "hotfix").unwrap();

    let contents = fs::read_to_string(worktree.join(".git")).unwrap();
    assert!(contents.starts_with("gitdir: "));
    assert!(contents.trim_end().ends_with(&format!("{BARE_DIR}/worktrees/hotfix")));
}

#[test]
fn test_config_round_trip_through_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = Config {
        default_base_branch: "develop".to_string(),
        zoxide_folders: vec!["apps/*".to_string()],
        post_add_script: Some("make setup".to_string()),
        worktree_root: None,
    };
    fs::write(&path, toml::to_string(&config).unwrap()).unwrap();

    let loaded = Config::load_from(&path);
    assert_eq!(loaded.default_base_branch, "develop");
    assert_eq!(loaded.zoxide_folders, vec!["apps/*"]);
    assert_eq!(loaded.post_add_script.as_deref(), Some("make setup"));
}
