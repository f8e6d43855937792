//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, errors, state machines)
//! - `catalog` - Canonical reference data and its normalization
//! - `selection` - Selection state aggregate and flow steps
//! - `scoring` - Pure fit scoring of roles against a selection

pub mod catalog;
pub mod foundation;
pub mod scoring;
pub mod selection;
