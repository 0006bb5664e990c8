//! sesh session-manager integration

use anyhow::{bail, Result};
use std::path::Path;

use crate::git::runner::{run_checked, CommandRunner};

/// True when the `sesh` binary is on PATH.
pub fn available() -> bool {
    which::which("sesh").is_ok()
}

/// Connect to a sesh target (a session name or a directory path).
pub fn connect(runner: &dyn CommandRunner, target: &str, cwd: &Path) -> Result<()> {
    if !available() {
        bail!("sesh not found on PATH");
    }
    run_checked(runner, "sesh", &["connect", target], cwd)?;
    Ok(())
}
