//! User configuration
//!
//! Optional `~/.config/arbor/config.toml`; every field has a default so a
//! missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base branch used when `--base` is not given.
    pub default_base_branch: String,

    /// Folder patterns registered with zoxide for every worktree, relative
    /// to the worktree root. A trailing `*` in the final segment expands one
    /// directory level.
    pub zoxide_folders: Vec<String>,

    /// Optional command run inside a new worktree after a successful add
    /// (only when the add was flagged to run it).
    pub post_add_script: Option<String>,

    /// Explicit worktree root; when unset the root is discovered by walking
    /// up from the current directory to the first `.bare` parent.
    pub worktree_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_base_branch: "main".to_string(),
            zoxide_folders: Vec::new(),
            post_add_script: None,
            worktree_root: None,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable. A malformed file is warned about, not
    /// fatal: the tool stays usable with defaults.
    pub fn load() -> Self {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring malformed config {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("arbor").join("config.toml"))
}
