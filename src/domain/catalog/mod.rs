//! Catalog Module - Canonical reference data.
//!
//! # Components
//!
//! - `Category`, `Trait`, `Role` - Canonical records
//! - `Catalog` - Session-scoped, read-only lookup maps over the records
//! - `DataNormalizer` - Pure conversion from loosely shaped documents
//! - `fixture_catalog` - Built-in dataset used when every source fails

mod fixture;
mod model;
mod normalizer;

pub use fixture::{fixture_bundle, fixture_catalog};
pub use model::{CanonicalRecord, Catalog, Category, RecordKind, Role, Trait};
pub use normalizer::{slugify, DataNormalizer};
