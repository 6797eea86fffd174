//! Infrastructure layer - external adapters (database, filesystem).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod config;
pub mod kv_storage;

pub use config::{ensure_config_exists, load_config, save_config};
#[cfg(test)]
pub use kv_storage::MemoryPreferences;
pub use kv_storage::{PreferenceStore, SqlitePreferences};
