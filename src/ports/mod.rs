//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `KeyValueStore` - Durable string storage for the selection state
//!
//! ## Reference Data Ports
//!
//! - `ReferenceSource` - Fetches one raw reference document

mod key_value_store;
mod reference_source;

pub use key_value_store::{KeyValueStore, StoreError};
pub use reference_source::{ReferenceSource, SourceError};
