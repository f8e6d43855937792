//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Key-value stores (file, in-memory)
//! - `reference` - Reference document sources (filesystem, HTTP)

pub mod reference;
pub mod storage;

pub use reference::{source_for, FileReferenceSource, HttpReferenceSource};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
