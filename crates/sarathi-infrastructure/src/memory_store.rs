//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use sarathi_core::session::KeyValueStore;

/// A [`KeyValueStore`] that lives only for the process lifetime.
///
/// Backs sessions wherever durable storage is unwanted, integration tests
/// first among them.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another writer panicked mid-update; the
    // map itself is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}
