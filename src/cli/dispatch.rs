use anyhow::Result;

use crate::commands::{add, clean, clone, delete, list, ui};
use crate::commands::add::AddRequest;
use crate::deps::Deps;

use super::types::Commands;

pub fn dispatch(deps: &Deps, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            branch,
            base,
            pull,
            sesh,
            sesh_target,
            cursor,
            vscode,
            script,
            directory,
            name,
        } => add::execute(
            deps,
            AddRequest {
                branch,
                base,
                pull,
                run_script: script,
                cursor,
                vscode,
                directory,
                name,
                sesh,
                sesh_target,
            },
        ),
        Commands::Delete {
            branches,
            force,
            delete_branch,
        } => delete::execute(deps, branches, force, delete_branch),
        Commands::Clean => clean::execute(deps),
        Commands::List { verbose } => list::execute(deps, verbose),
        Commands::Clone { url, folder } => clone::execute(deps, url, folder),
        Commands::Ui => ui::execute(deps),
    }
}
