//! `arbor ui` — interactive terminal view

use anyhow::Result;

use crate::deps::Deps;
use crate::tui;

pub fn execute(deps: &Deps) -> Result<()> {
    let root = super::resolve_root(&deps.config)?;
    tui::run(deps.clone(), &root)
}
