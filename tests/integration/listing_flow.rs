//! Listing parse to stale-diff flow

use arbor::git::{parse_worktree_listing, remove_origin_prefix};
use arbor::reconcile::{branch_match_list, branch_no_match_list};

#[test]
fn test_listing_with_bare_header_yields_single_record() {
    let records = parse_worktree_listing("/x/development 94dbf6 [dev_fix]\n/x/platform_bare (bare)\n");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].full_path, "/x/development");
    assert_eq!(records[0].folder, "development");
    assert_eq!(records[0].branch_name, "dev_fix");
    assert_eq!(records[0].commit_hash, "94dbf6");
}

#[test]
fn test_stale_diff_matches_on_folder() {
    let listing = "\
/x/main 1111aa [main]\n\
/x/feature 2222bb [feature]\n\
/x/.bare (bare)\n\
\n";
    let records = parse_worktree_listing(listing);
    let remote = remove_origin_prefix(["origin/main", "origin/develop"]);

    let stale = branch_no_match_list(&remote, &records);
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].folder, "feature");
}

#[test]
fn test_selection_resolves_in_listing_order() {
    let listing = "/x/a 1 [a]\n/x/b 2 [b]\n/x/c 3 [c]\n";
    let records = parse_worktree_listing(listing);

    let chosen = branch_match_list(&["c".to_string(), "a".to_string()], &records);
    let folders: Vec<&str> = chosen.iter().map(|r| r.folder.as_str()).collect();
    assert_eq!(folders, vec!["a", "c"]);
}

#[test]
fn test_origin_prefix_strip_is_idempotent() {
    let once = remove_origin_prefix(["origin/main", " develop ", "origin/hotfix/x"]);
    let twice = remove_origin_prefix(once.clone());
    assert_eq!(once, twice);
    assert_eq!(once, vec!["main", "develop", "hotfix/x"]);
}
