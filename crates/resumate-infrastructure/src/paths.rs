//! Path management for resumate files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/resumate/          # Config directory
//! └── config.toml              # Client configuration
//!
//! ~/.local/share/resumate/     # Data directory
//! └── state.json               # Session, history, and preferences
//! ```

use std::path::{Path, PathBuf};

use resumate_core::error::{ResumateError, Result};

const APP_DIR: &str = "resumate";

pub struct ResumatePaths;

impl ResumatePaths {
    /// Returns the resumate configuration directory (e.g. `~/.config/resumate/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ResumateError::config("Cannot determine config directory"))
    }

    /// Returns the resumate data directory (e.g. `~/.local/share/resumate/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ResumateError::config("Cannot determine data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default location of the persisted client state.
    pub fn state_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("state.json"))
    }

    /// Expands a leading `~` to the home directory.
    pub fn expand_home(path: &Path) -> PathBuf {
        let Ok(rest) = path.strip_prefix("~") else {
            return path.to_path_buf();
        };
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        if let Ok(config) = ResumatePaths::config_file() {
            assert!(config.ends_with("resumate/config.toml"));
        }
        if let Ok(state) = ResumatePaths::state_file() {
            assert!(state.ends_with("resumate/state.json"));
        }
    }

    #[test]
    fn test_expand_home_leaves_other_paths_alone() {
        let absolute = Path::new("/var/lib/resumate/state.json");
        assert_eq!(ResumatePaths::expand_home(absolute), absolute);

        let relative = Path::new("state/~file.json");
        assert_eq!(ResumatePaths::expand_home(relative), relative);
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                ResumatePaths::expand_home(Path::new("~/state.json")),
                home.join("state.json")
            );
        }
    }
}
