//! Command runner abstraction
//!
//! Every external process (git, zoxide, sesh, editors) goes through the
//! [`CommandRunner`] trait so tests can script command output instead of
//! spawning processes. The helpers mirror the three shapes callers need:
//! raw output, checked stdout, and a boolean status probe.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Captured output of one external command.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Boundary for running external commands.
///
/// One production implementation ([`ProcessRunner`]) spawns real processes;
/// tests substitute a scripted double.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<RunOutput>;
}

/// Production runner backed by `std::process::Command`.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<RunOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("Failed to execute: {program} {}", args.join(" ")))?;

        Ok(RunOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Run a command, check for success, and return stdout as a trimmed String.
///
/// On failure, bails with the stderr content.
pub fn run_checked(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
    cwd: &Path,
) -> Result<String> {
    let output = runner.run(program, args, cwd)?;
    if !output.success {
        let cmd = args.first().copied().unwrap_or(program);
        bail!("{program} {cmd} failed: {}", output.stderr.trim());
    }
    Ok(output.stdout.trim().to_string())
}

/// Run a command and return true if it exited successfully.
///
/// Silently swallows errors (both spawn failures and non-zero exits).
/// Use this for status probes like `rev-parse --verify`.
pub fn run_bool(runner: &dyn CommandRunner, program: &str, args: &[&str], cwd: &Path) -> bool {
    runner
        .run(program, args, cwd)
        .map(|output| output.success)
        .unwrap_or(false)
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedRunner;
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_run_checked_trims_stdout() {
        let runner = ScriptedRunner::new().respond("git rev-parse HEAD", true, "abc123\n", "");
        let out = run_checked(&runner, "git", &["rev-parse", "HEAD"], &PathBuf::from(".")).unwrap();
        assert_eq!(out, "abc123");
    }

    #[test]
    fn test_run_checked_bails_with_stderr() {
        let runner = ScriptedRunner::new().respond("git fetch", false, "", "no remote\n");
        let err = run_checked(&runner, "git", &["fetch"], &PathBuf::from("."))
            .unwrap_err()
            .to_string();
        assert!(err.contains("no remote"));
    }

    #[test]
    fn test_run_bool_swallows_spawn_failure() {
        let runner = ScriptedRunner::new().fail_spawn("git status");
        assert!(!run_bool(&runner, "git", &["status"], &PathBuf::from(".")));
    }
}
