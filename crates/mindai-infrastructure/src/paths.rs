//! Unified path management for MindAI configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mindai/            # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/mindai/       # Data directory
//! ├── identity.json            # Client identity (created on first access)
//! └── session/
//!     └── current_solution.json  # Durable snapshot of the displayed solution
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "mindai";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for mindai_core::MindaiError {
    fn from(err: PathError) -> Self {
        mindai_core::MindaiError::config(err.to_string())
    }
}

/// Resolves MindAI paths, optionally rooted at an override directory.
///
/// With an override (tests, `storage.data_dir`), both config and data live
/// under it; otherwise the platform directories from `dirs` are used.
#[derive(Debug, Clone, Default)]
pub struct MindaiPaths {
    base_override: Option<PathBuf>,
}

impl MindaiPaths {
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    /// Returns the MindAI configuration directory (e.g. `~/.config/mindai/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the MindAI data directory (e.g. `~/.local/share/mindai/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn identity_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("identity.json"))
    }

    pub fn snapshot_file(&self) -> Result<PathBuf, PathError> {
        Ok(session_dir(&self.data_dir()?).join("current_solution.json"))
    }
}

fn session_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("session")
}
