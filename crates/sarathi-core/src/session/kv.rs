//! Key-value storage capability used by the session store.

/// Minimal capability interface over a durable string key-value store.
///
/// The session layer only ever needs three operations over string keys, and
/// it needs them to be infallible from the caller's point of view: a store
/// that cannot persist should log and degrade, never abort an auth check.
/// Implementations live in the infrastructure crate; tests use in-memory
/// maps.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key` if present. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}
