use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "
   ╷
   │  ┌─┐┬─┐┌┐ ┌─┐┬─┐
   │  ├─┤├┬┘├┴┐│ │├┬┘
   ┴─┘┴ ┴┴└─└─┘└─┘┴└─

{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Bare-repo git worktree manager", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a worktree for a branch (existing or new)
    Add {
        /// Branch to check out or create
        branch: String,

        /// Base branch to cut a new branch from (default from config)
        #[arg(short, long)]
        base: Option<String>,

        /// Cut from the freshly fetched remote tip instead of the local one
        #[arg(short, long)]
        pull: bool,

        /// Connect to the new worktree with sesh afterwards
        #[arg(short, long)]
        sesh: bool,

        /// Explicit sesh target instead of the worktree path
        #[arg(long)]
        sesh_target: Option<String>,

        /// Open the new worktree in Cursor
        #[arg(long)]
        cursor: bool,

        /// Open the new worktree in VS Code
        #[arg(long)]
        vscode: bool,

        /// Run the configured post-add script inside the new worktree
        #[arg(short = 'x', long)]
        script: bool,

        /// Worktree root to create in (default: discovered from cwd)
        #[arg(short, long)]
        directory: Option<std::path::PathBuf>,

        /// Folder name for the worktree (default: the branch name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Remove worktrees (interactive selection when no names are given)
    Delete {
        /// Worktree folder names to remove
        branches: Vec<String>,

        /// Force removal even with local changes
        #[arg(short, long)]
        force: bool,

        /// Also delete the local branch refs (confirmed once for the batch)
        #[arg(long)]
        delete_branch: bool,
    },

    /// Interactively remove worktrees whose folder has no remote branch
    Clean,

    /// List worktrees, most recently used first
    List {
        /// Include commit hash and zoxide score
        #[arg(short, long)]
        verbose: bool,
    },

    /// Clone a repository into the bare-plus-worktrees layout
    Clone {
        /// Repository URL
        url: String,

        /// Target directory (default: derived from the URL)
        folder: Option<String>,
    },

    /// Open the interactive terminal view
    Ui,
}
