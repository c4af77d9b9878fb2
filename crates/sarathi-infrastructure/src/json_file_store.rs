//! File-backed key-value store with atomic writes.
//!
//! Persists a flat string map as pretty JSON. Every mutation rewrites the
//! file through a tmp-file-plus-rename cycle, so a crash mid-write leaves
//! either the old record or the new one, never a torn file.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sarathi_core::SarathiError;
use sarathi_core::session::KeyValueStore;
use tracing::warn;

use crate::paths::SarathiPaths;

/// A [`KeyValueStore`] backed by a single JSON file.
///
/// Reads are served from memory; the file is only touched on mutation.
/// Storage failures are logged and swallowed so an unwritable disk degrades
/// the client to a per-run session instead of breaking it.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading any existing record.
    ///
    /// A file that cannot be read or parsed is treated as empty; the next
    /// write replaces it.
    pub fn open(path: PathBuf) -> Self {
        let entries = Self::load(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Opens the store at the default profile location.
    pub fn open_default() -> Result<Self, SarathiError> {
        let path = SarathiPaths::profile_file()
            .map_err(|err| SarathiError::config(err.to_string()))?;
        Ok(Self::open(path))
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read profile store, starting empty");
                return BTreeMap::new();
            }
        };

        if content.trim().is_empty() {
            return BTreeMap::new();
        }

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "profile store is corrupt, starting empty");
                BTreeMap::new()
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Err(err) = self.try_persist(entries) {
            warn!(path = %self.path.display(), error = %err, "could not persist profile store");
        }
    }

    fn try_persist(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(std::io::Error::other)?;

        // Write to temporary file in the same directory
        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        // The record holds a bearer token; user read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        // Atomic rename
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile.json".to_string());
        self.path.with_file_name(format!(".{file_name}.tmp"))
    }

    // A poisoned lock only means another writer panicked mid-update; the
    // map itself is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile.json");

        {
            let store = JsonFileStore::open(path.clone());
            store.set("authToken", "tok-123");
            store.set("userEmail", "user@example.com");
            store.remove("userEmail");
        }

        let reopened = JsonFileStore::open(path);
        assert_eq!(reopened.get("authToken").as_deref(), Some("tok-123"));
        assert_eq!(reopened.get("userEmail"), None);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path().join("nonexistent.json"));

        assert_eq!(store.get("authToken"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty_and_recovers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile.json");
        fs::write(&path, "{ not json at all").unwrap();

        let store = JsonFileStore::open(path.clone());
        assert_eq!(store.get("authToken"), None);

        // The next write replaces the corrupt file with a valid one.
        store.set("authToken", "tok-123");
        let reopened = JsonFileStore::open(path);
        assert_eq!(reopened.get("authToken").as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("profile.json");

        let store = JsonFileStore::open(path.clone());
        store.set("authToken", "tok-123");

        assert!(path.exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile.json");

        let store = JsonFileStore::open(path.clone());
        store.set("authToken", "tok-123");

        assert!(path.exists());
        assert!(!temp_dir.path().join(".profile.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_user_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile.json");

        let store = JsonFileStore::open(path.clone());
        store.set("authToken", "tok-123");

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
