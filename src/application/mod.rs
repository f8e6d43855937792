//! Application layer - Session orchestration.
//!
//! This layer coordinates domain operations with the ports:
//! - `loader` - Resolves reference documents into a catalog
//! - `persistence` - Durable, failure-tolerant selection storage
//! - `selection` - Selection state machine with persistence on every mutation
//! - `context` - The per-session `AppContext` tying it all together

mod context;
mod loader;
mod persistence;
mod selection;

pub use context::{store_for, AppContext};
pub use loader::{is_well_formed_bundle, CatalogOrigin, LoadedCatalog, ReferenceDataLoader};
pub use persistence::{PersistenceStore, LEGACY_SCHEMA_VERSION, SCHEMA_VERSION};
pub use selection::SelectionStateMachine;
