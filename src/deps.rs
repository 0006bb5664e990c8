//! Capability bundle
//!
//! All external collaborators, constructed once at process start and passed
//! down explicitly. Read-only after construction; background tasks receive a
//! clone (the trait objects are shared via `Arc`).

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::git::runner::{CommandRunner, ProcessRunner};
use crate::prompt::{Prompter, StdinPrompter};
use crate::zoxide::{DirIndex, Zoxide};

#[derive(Clone)]
pub struct Deps {
    pub runner: Arc<dyn CommandRunner>,
    pub index: Arc<dyn DirIndex>,
    pub prompter: Arc<dyn Prompter>,
    pub config: Config,
}

impl Deps {
    /// Production wiring: real processes, zoxide index, stdin prompts.
    pub fn production(config: Config, cwd: &Path) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner);
        let index = Arc::new(Zoxide::new(runner.clone(), cwd));
        Self {
            runner,
            index,
            prompter: Arc::new(StdinPrompter),
            config,
        }
    }
}
