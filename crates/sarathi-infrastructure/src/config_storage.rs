//! Loading and bootstrapping the application configuration.

use std::fs;
use std::path::PathBuf;

use sarathi_core::SarathiError;
use sarathi_core::config::AppConfig;
use tracing::{info, warn};

use crate::paths::SarathiPaths;

/// Reads `config.toml`, writing a default one on first run.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a storage over the default config location.
    pub fn new() -> Result<Self, SarathiError> {
        let path = SarathiPaths::config_file()
            .map_err(|err| SarathiError::config(err.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a storage over an explicit file, for tests and overrides.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, materializing defaults when the file does
    /// not exist yet.
    ///
    /// A file that exists but does not parse is an error; silently falling
    /// back to defaults would hide typos in endpoints.
    ///
    /// # Errors
    ///
    /// Returns `SarathiError::Serialization` for a malformed file and
    /// `SarathiError::Io` when the file exists but cannot be read.
    pub fn load_or_init(&self) -> Result<AppConfig, SarathiError> {
        if !self.path.exists() {
            let config = AppConfig::default();
            self.write_default(&config);
            return Ok(config);
        }

        let content = fs::read_to_string(&self.path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    // First-run convenience only; an unwritable directory should not stop
    // the client from using defaults.
    fn write_default(&self, config: &AppConfig) {
        let result = (|| -> Result<(), SarathiError> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(config)?;
            fs::write(&self.path, content)?;
            Ok(())
        })();

        match result {
            Ok(()) => info!(path = %self.path.display(), "wrote default configuration"),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not write default configuration")
            }
        }
    }
}
