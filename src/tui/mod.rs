//! Interactive terminal view
//!
//! A modal session over the worktree table: add input, delete confirmation,
//! and the directory popup are mutually exclusive modes driven by a single
//! cooperative event loop.

pub mod app;
pub mod event;
pub mod render;
pub mod state;
pub mod task;

use anyhow::Result;
use std::path::Path;

use crate::deps::Deps;

pub fn run(deps: Deps, root: &Path) -> Result<()> {
    let mut app = app::TuiApp::new(deps, root)?;
    app.run()
}
