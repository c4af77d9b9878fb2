use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use sarathi_core::config::AppConfig;
use sarathi_core::session::SessionStore;
use sarathi_infrastructure::{ConfigStorage, JsonFileStore};

/// Loads `config.toml`, writing the default one on first run.
pub fn load_config() -> Result<AppConfig> {
    let storage = ConfigStorage::new().context("Failed to locate the configuration directory")?;
    storage.load_or_init().context("Failed to load configuration")
}

/// Opens the session store over the on-disk profile.
pub fn open_session() -> Result<Arc<SessionStore>> {
    let store = JsonFileStore::open_default().context("Failed to locate the profile store")?;
    Ok(Arc::new(SessionStore::new(Arc::new(store))))
}

/// Prints `label` and reads one trimmed line from stdin.
pub fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}
