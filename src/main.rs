use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arbor::cli::{dispatch, Cli};
use arbor::config::Config;
use arbor::deps::Deps;
use arbor::git::check_git_available;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    check_git_available()?;

    let cli = Cli::parse();
    let config = Config::load();
    let cwd = std::env::current_dir()?;
    let deps = Deps::production(config, &cwd);

    dispatch(&deps, cli.command)
}
