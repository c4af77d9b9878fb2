pub mod config_storage;
pub mod json_file_store;
pub mod memory_store;
pub mod paths;

pub use crate::config_storage::ConfigStorage;
pub use crate::json_file_store::JsonFileStore;
pub use crate::memory_store::MemoryStore;
pub use crate::paths::SarathiPaths;
