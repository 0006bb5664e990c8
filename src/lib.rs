pub mod cli;
pub mod commands;
pub mod config;
pub mod deps;
pub mod git;
pub mod prompt;
pub mod reconcile;
pub mod sesh;
pub mod tui;
pub mod zoxide;
