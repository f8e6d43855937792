//! PersistenceStore - Durable, failure-tolerant storage of the selection.
//!
//! Wraps a `KeyValueStore` with the selection's key layout, JSON encoding and
//! legacy migration. Every operation is total: storage failures are logged,
//! mark the store degraded, and otherwise behave as "nothing persisted".

use serde_json::{Map, Value as JsonValue};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::foundation::{UpcastError, Upcaster, UpcasterRegistry};
use crate::domain::selection::SelectionState;
use crate::ports::{KeyValueStore, StoreError};

/// Current schema version of the persisted selection.
pub const SCHEMA_VERSION: u32 = 2;

/// Schema version of the legacy `<namespace>_state_v1` payload.
pub const LEGACY_SCHEMA_VERSION: u32 = 1;

/// Upcasts the legacy payload, which stored traits under `selectedTraits`.
struct LegacySelectionUpcaster;

impl Upcaster for LegacySelectionUpcaster {
    fn source_version(&self) -> u32 {
        LEGACY_SCHEMA_VERSION
    }

    fn upcast(&self, payload: JsonValue) -> Result<JsonValue, UpcastError> {
        let JsonValue::Object(mut legacy) = payload else {
            return Err(UpcastError::InvalidValue(
                "legacy selection is not an object".to_string(),
            ));
        };

        let mut current = Map::new();
        if let Some(categories) = legacy.remove("categoryIds") {
            current.insert("categoryIds".to_string(), categories);
        }
        if let Some(traits) = legacy.remove("selectedTraits") {
            current.insert("traitIds".to_string(), traits);
        }
        if let Some(notes) = legacy.remove("notes") {
            current.insert("notes".to_string(), notes);
        }

        Ok(JsonValue::Object(current))
    }
}

/// Durable storage of one session's selection.
pub struct PersistenceStore {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
    upcasters: UpcasterRegistry,
    degraded: AtomicBool,
}

impl PersistenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        let mut upcasters = UpcasterRegistry::new(SCHEMA_VERSION);
        upcasters.register(Arc::new(LegacySelectionUpcaster));

        Self {
            store,
            namespace: namespace.into(),
            upcasters,
            degraded: AtomicBool::new(false),
        }
    }

    /// Key holding the current-schema selection.
    pub fn key(&self) -> String {
        format!("{}.selection.v{}", self.namespace, SCHEMA_VERSION)
    }

    /// Key the legacy schema was stored under.
    pub fn legacy_key(&self) -> String {
        format!("{}_state_v{}", self.namespace, LEGACY_SCHEMA_VERSION)
    }

    /// Returns true once any storage operation has failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Loads the persisted selection, or defaults if none is usable.
    pub fn load(&self) -> SelectionState {
        let key = self.key();
        match self.store.get(&key) {
            Ok(Some(raw)) => self.decode(&key, SCHEMA_VERSION, &raw).unwrap_or_default(),
            Ok(None) => self.migrate_legacy().unwrap_or_default(),
            Err(err) => {
                self.mark_degraded("load", &err);
                SelectionState::default()
            }
        }
    }

    /// Persists the selection. Failures are logged and swallowed.
    pub fn save(&self, state: &SelectionState) {
        let raw = match serde_json::to_string(state) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to encode selection");
                return;
            }
        };

        match self.store.set(&self.key(), &raw) {
            Ok(()) => tracing::debug!(key = %self.key(), "Selection saved"),
            Err(err) => self.mark_degraded("save", &err),
        }
    }

    /// Reads and upcasts the legacy payload, moving it to the current key.
    fn migrate_legacy(&self) -> Option<SelectionState> {
        let legacy_key = self.legacy_key();
        let raw = match self.store.get(&legacy_key) {
            Ok(raw) => raw?,
            Err(err) => {
                self.mark_degraded("load legacy", &err);
                return None;
            }
        };

        let state = self.decode(&legacy_key, LEGACY_SCHEMA_VERSION, &raw)?;
        tracing::info!(from = %legacy_key, to = %self.key(), "Migrated legacy selection");

        self.save(&state);
        if let Err(err) = self.store.remove(&legacy_key) {
            self.mark_degraded("remove legacy", &err);
        }
        Some(state)
    }

    /// Parses and upcasts a payload. Unusable payloads are discarded whole.
    fn decode(&self, key: &str, version: u32, raw: &str) -> Option<SelectionState> {
        let payload: JsonValue = match serde_json::from_str(raw) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(key, error = %err, "Discarding corrupted selection");
                return None;
            }
        };

        let current = match self.upcasters.upcast_to_current(version, payload) {
            Ok(current) => current,
            Err(err) => {
                tracing::warn!(key, version, error = %err, "Discarding unmigratable selection");
                return None;
            }
        };

        match serde_json::from_value(current) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(key, error = %err, "Discarding malformed selection");
                None
            }
        }
    }

    fn mark_degraded(&self, operation: &str, err: &StoreError) {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            tracing::warn!(operation, error = %err, "Persistence unavailable, continuing in memory");
        } else {
            tracing::debug!(operation, error = %err, "Persistence still unavailable");
        }
    }
}
