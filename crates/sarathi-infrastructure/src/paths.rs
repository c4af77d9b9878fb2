//! Unified path management for Sarathi configuration files.
//!
//! All client state lives under one configuration directory so that login,
//! chat and future tooling agree on where things are.

use std::path::PathBuf;

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

/// Unified path management for Sarathi.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/sarathi/           # Config directory
/// ├── config.toml              # Application configuration
/// └── profile.json             # Persisted session record
/// ```
pub struct SarathiPaths;

impl SarathiPaths {
    /// Returns the Sarathi configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/sarathi/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("sarathi"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session record.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer token; the store that writes it restricts
    /// permissions to the owning user on Unix.
    pub fn profile_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("profile.json"))
    }
}
