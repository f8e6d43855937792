//! SelectionStateMachine - The session's selection with durable mutations.
//!
//! Owns the `SelectionState` aggregate and persists it after every
//! successful mutation. A revision counter lets consumers invalidate
//! derived data (such as ranked roles) cheaply.

use crate::domain::selection::{CategoryToggle, FlowStep, SelectionState};

use super::PersistenceStore;

/// The session's selection state and its persistence.
pub struct SelectionStateMachine {
    state: SelectionState,
    store: PersistenceStore,
    revision: u64,
}

impl SelectionStateMachine {
    /// Restores the persisted selection, or starts empty.
    pub fn restore(store: PersistenceStore) -> Self {
        let state = store.load();
        tracing::debug!(
            categories = state.category_ids().len(),
            traits = state.trait_ids().len(),
            "Selection restored"
        );

        Self {
            state,
            store,
            revision: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Counter bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggles a category. Any change clears the selected traits.
    pub fn toggle_category(&mut self, id: &str) -> CategoryToggle {
        let outcome = self.state.toggle_category(id);
        tracing::debug!(category = id, ?outcome, "Category toggled");
        self.commit();
        outcome
    }

    /// Toggles a trait. Returns whether it is selected afterwards.
    pub fn toggle_trait(&mut self, id: &str) -> bool {
        let selected = self.state.toggle_trait(id);
        tracing::debug!(trait_id = id, selected, "Trait toggled");
        self.commit();
        selected
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.state.set_notes(notes);
        self.commit();
    }

    /// Restores the empty defaults and persists them.
    pub fn reset(&mut self) {
        self.state.clear();
        tracing::debug!("Selection reset");
        self.commit();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Guards
    // ─────────────────────────────────────────────────────────────────────────

    pub fn can_proceed_from_categories(&self) -> bool {
        self.state.can_proceed_from_categories()
    }

    pub fn can_proceed_from_traits(&self) -> bool {
        self.state.can_proceed_from_traits()
    }

    pub fn can_enter(&self, step: FlowStep) -> bool {
        self.state.can_enter(step)
    }

    pub fn resume_step(&self) -> FlowStep {
        self.state.resume_step()
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.store.save(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::ports::{KeyValueStore, StoreError};
    use proptest::prelude::*;
    use std::sync::Arc;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::unavailable("read-only"))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn machine_on(kv: &InMemoryKeyValueStore) -> SelectionStateMachine {
        SelectionStateMachine::restore(PersistenceStore::new(Arc::new(kv.clone()), "test"))
    }

    #[test]
    fn fifo_eviction_persists() {
        let kv = InMemoryKeyValueStore::new();
        let mut machine = machine_on(&kv);

        machine.toggle_category("A");
        machine.toggle_category("B");
        let outcome = machine.toggle_category("C");

        assert_eq!(
            outcome,
            CategoryToggle::Replaced {
                evicted: "A".to_string()
            }
        );
        assert_eq!(
            machine.state().category_ids(),
            &["B".to_string(), "C".to_string()]
        );

        let restored = machine_on(&kv);
        assert_eq!(restored.state(), machine.state());
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let kv = InMemoryKeyValueStore::new();
        let mut machine = machine_on(&kv);
        assert_eq!(machine.revision(), 0);

        machine.toggle_category("A");
        machine.toggle_trait("t");
        machine.set_notes("n");
        machine.reset();

        assert_eq!(machine.revision(), 4);
    }

    #[test]
    fn reset_persists_defaults() {
        let kv = InMemoryKeyValueStore::new();
        let mut machine = machine_on(&kv);
        machine.toggle_category("A");
        machine.set_notes("n");

        machine.reset();

        assert_eq!(machine_on(&kv).state(), &SelectionState::default());
    }

    #[test]
    fn notes_survive_restore() {
        let kv = InMemoryKeyValueStore::new();
        let mut machine = machine_on(&kv);
        machine.set_notes("remember this");

        assert_eq!(machine_on(&kv).state().notes(), "remember this");
    }

    #[test]
    fn guards_and_resume_step_follow_state() {
        let kv = InMemoryKeyValueStore::new();
        let mut machine = machine_on(&kv);
        assert!(!machine.can_proceed_from_categories());

        machine.toggle_category("A");
        for i in 0..5 {
            machine.toggle_trait(&format!("t{}", i));
        }

        assert!(machine.can_proceed_from_categories());
        assert!(machine.can_proceed_from_traits());
        assert!(machine.can_enter(FlowStep::Roles));
        assert_eq!(machine_on(&kv).resume_step(), FlowStep::Roles);
    }

    #[test]
    fn storage_failure_keeps_state_in_memory() {
        let mut machine =
            SelectionStateMachine::restore(PersistenceStore::new(Arc::new(ReadOnlyStore), "test"));

        machine.toggle_category("A");
        assert!(machine.toggle_trait("t"));

        assert!(machine.is_degraded());
        assert_eq!(machine.state().category_ids(), &["A".to_string()]);
        assert_eq!(machine.state().trait_ids(), &["t".to_string()]);
    }

    proptest! {
        #[test]
        fn persisted_state_always_matches_memory(
            ops in proptest::collection::vec((any::<bool>(), "[a-d]"), 1..32)
        ) {
            let kv = InMemoryKeyValueStore::new();
            let mut machine = machine_on(&kv);

            for (is_category, id) in ops {
                if is_category {
                    machine.toggle_category(&id);
                } else {
                    machine.toggle_trait(&id);
                }
            }

            let restored = machine_on(&kv);
            prop_assert_eq!(restored.state(), machine.state());
        }
    }
}
