//! Creation-argument decision matrix, exercised exhaustively

use arbor::git::{determine_creation_args, AddDecisionInput};

fn input(
    new_local: bool,
    new_remote: bool,
    base_local: bool,
    pull: bool,
) -> AddDecisionInput {
    AddDecisionInput {
        new_branch_name: "hotfix".to_string(),
        base_branch_name: "prod".to_string(),
        new_branch_exists_locally: new_local,
        new_branch_exists_remotely: new_remote,
        base_branch_exists_locally: base_local,
        pull_before_cutting_new_branch: pull,
    }
}

#[test]
fn test_every_flag_combination_lands_in_one_rule() {
    for new_local in [false, true] {
        for new_remote in [false, true] {
            for base_local in [false, true] {
                for pull in [false, true] {
                    let args =
                        determine_creation_args(&input(new_local, new_remote, base_local, pull));

                    if new_local || new_remote {
                        assert_eq!(args, vec!["hotfix"]);
                    } else if base_local && pull {
                        assert_eq!(args, vec!["-b", "hotfix", "origin/prod", "--no-track"]);
                    } else if base_local {
                        assert_eq!(args, vec!["-b", "hotfix", "prod"]);
                    } else {
                        assert_eq!(args, vec!["-b", "hotfix", "origin/prod", "--no-track"]);
                    }
                }
            }
        }
    }
}

#[test]
fn test_pull_from_remote_tip_scenario() {
    let args = determine_creation_args(&input(false, false, true, true));
    assert_eq!(args, vec!["-b", "hotfix", "origin/prod", "--no-track"]);
}
