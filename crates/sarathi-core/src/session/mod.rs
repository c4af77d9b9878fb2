//! Session domain module.
//!
//! Everything about the durable authentication record: the key-value
//! capability it is stored through, the record itself, and the store that
//! enforces token validity.
//!
//! # Module Structure
//!
//! - `kv`: Storage capability trait (`KeyValueStore`)
//! - `record`: The persisted record and its storage keys (`SessionRecord`)
//! - `store`: Lifecycle and validity logic (`SessionStore`)

mod kv;
mod record;
mod store;

// Re-export public API
pub use kv::KeyValueStore;
pub use record::{SessionRecord, keys};
pub use store::{DEFAULT_TOKEN_KIND, SessionStore};
