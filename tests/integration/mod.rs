//! Integration tests for arbor's reconciliation and lifecycle surfaces
//!
//! These exercise the public library end to end: listing parse to stale
//! diff, the creation decision matrix, index path compilation against a
//! real filesystem, and the bare-repo layout helpers.

pub mod add_matrix;
pub mod layout;
pub mod listing_flow;
pub mod zoxide_paths;
