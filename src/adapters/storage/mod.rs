//! Storage Adapters
//!
//! Implementations of the KeyValueStore port for persisting the selection.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - One JSON file per key on disk
//! - **InMemoryKeyValueStore** - Values kept in memory (testing/ephemeral sessions)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
//!
//! // Durable: file-based storage
//! let store = FileKeyValueStore::new("./.role-compass");
//!
//! // Testing: in-memory storage
//! let store = InMemoryKeyValueStore::new();
//! ```

mod file_key_value_store;
mod in_memory_key_value_store;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
