//! Reconciliation of local worktrees against remote branch state

pub mod matcher;
pub mod service;

pub use matcher::{branch_match_list, branch_no_match_list};
pub use service::{ReconciliationService, RemovalOptions, RemovalReport};
