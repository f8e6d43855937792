//! Upcaster infrastructure for persisted payload schema evolution.
//!
//! Transforms payloads written by an older schema version into the current
//! shape, one version step at a time.
//!
//! # Architecture
//!
//! - `Upcaster` trait - Transforms a single version step (v1 → v2)
//! - `UpcasterRegistry` - Chains upcasters until the current version is reached
//! - `UpcastError` - Error types for failed transformations

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during upcasting.
#[derive(Debug, Error)]
pub enum UpcastError {
    /// Required field is missing from the source payload.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Field value is invalid or cannot be converted.
    #[error("invalid field value: {0}")]
    InvalidValue(String),

    /// No upcaster path exists from source to target version.
    #[error("incompatible version transition: v{from} → v{to}")]
    IncompatibleVersions { from: u32, to: u32 },
}

/// Transforms a payload from one schema version to the next.
///
/// Transformations must be deterministic and must not panic.
pub trait Upcaster: Send + Sync {
    /// Version this upcaster reads.
    fn source_version(&self) -> u32;

    /// Transform the payload from `source_version` to `source_version + 1`.
    fn upcast(&self, payload: JsonValue) -> Result<JsonValue, UpcastError>;
}

/// Registry that chains upcasters up to a fixed current version.
pub struct UpcasterRegistry {
    upcasters: HashMap<u32, Arc<dyn Upcaster>>,
    current_version: u32,
}

impl UpcasterRegistry {
    /// Creates an empty registry targeting `current_version`.
    pub fn new(current_version: u32) -> Self {
        Self {
            upcasters: HashMap::new(),
            current_version,
        }
    }

    /// Registers an upcaster for its source version.
    pub fn register(&mut self, upcaster: Arc<dyn Upcaster>) {
        self.upcasters.insert(upcaster.source_version(), upcaster);
    }

    /// Upcasts a payload written at `version` to the current version.
    ///
    /// Payloads already at the current version are returned as-is. Payloads
    /// from a newer version, or with a gap in the upcaster chain, fail with
    /// `IncompatibleVersions`.
    pub fn upcast_to_current(
        &self,
        version: u32,
        payload: JsonValue,
    ) -> Result<JsonValue, UpcastError> {
        if version > self.current_version {
            return Err(UpcastError::IncompatibleVersions {
                from: version,
                to: self.current_version,
            });
        }

        let mut current = payload;
        let mut at = version;
        while at < self.current_version {
            let upcaster =
                self.upcasters
                    .get(&at)
                    .ok_or(UpcastError::IncompatibleVersions {
                        from: at,
                        to: self.current_version,
                    })?;
            current = upcaster.upcast(current)?;
            at += 1;
        }

        Ok(current)
    }
}
