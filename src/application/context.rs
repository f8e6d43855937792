//! AppContext - Everything one session needs, built once and passed around.
//!
//! Holds the immutable catalog, the selection state machine, and a ranking
//! cache keyed by the selection revision.

use std::sync::Arc;

use crate::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::domain::catalog::{Catalog, Category, Trait};
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};
use crate::domain::scoring::{RoleRank, ScoredRole, ScoringEngine, SUMMARY_LIMIT};
use crate::domain::selection::{CategoryToggle, FlowStep, SelectionState, MAX_CATEGORIES, MIN_TRAITS};
use crate::ports::KeyValueStore;

use super::{CatalogOrigin, LoadedCatalog, PersistenceStore, ReferenceDataLoader, SelectionStateMachine};

/// Ranked roles computed for one selection revision.
struct RankingCache {
    revision: u64,
    ranks: Vec<RoleRank>,
}

/// One session's catalog, selection and derived data.
pub struct AppContext {
    catalog: Catalog,
    origin: CatalogOrigin,
    roles_location: Option<String>,
    selection: SelectionStateMachine,
    step: FlowStep,
    ranking: Option<RankingCache>,
}

impl AppContext {
    /// Loads reference data and restores the persisted selection.
    pub async fn bootstrap(config: &AppConfig) -> Self {
        let loaded = ReferenceDataLoader::from_config(&config.data).load().await;
        let persistence =
            PersistenceStore::new(store_for(&config.storage), config.storage.namespace.clone());
        Self::new(loaded, persistence)
    }

    /// Builds a context, resuming at the furthest step the selection allows.
    pub fn new(loaded: LoadedCatalog, persistence: PersistenceStore) -> Self {
        let selection = SelectionStateMachine::restore(persistence);
        let step = selection.resume_step();
        Self {
            catalog: loaded.catalog,
            origin: loaded.origin,
            roles_location: loaded.roles_location,
            selection,
            step,
            ranking: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reference data
    // ─────────────────────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn origin(&self) -> &CatalogOrigin {
        &self.origin
    }

    pub fn roles_location(&self) -> Option<&str> {
        self.roles_location.as_deref()
    }

    pub fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    /// Traits offered for the currently selected categories.
    pub fn available_traits(&self) -> Vec<&Trait> {
        self.catalog
            .traits_for_categories(self.selection.state().category_ids())
    }

    /// Names of the selected categories that resolve in the catalog.
    pub fn selected_category_names(&self) -> Vec<&str> {
        self.catalog
            .category_names(self.selection.state().category_ids())
    }

    /// Names of the selected traits that resolve in the catalog.
    pub fn selected_trait_names(&self) -> Vec<&str> {
        self.selection
            .state()
            .trait_ids()
            .iter()
            .filter_map(|id| self.catalog.traits_by_id(id))
            .map(|t| t.name.as_str())
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn revision(&self) -> u64 {
        self.selection.revision()
    }

    pub fn toggle_category(&mut self, id: &str) -> CategoryToggle {
        let outcome = self.selection.toggle_category(id);
        self.fall_back_to_reachable_step();
        outcome
    }

    pub fn toggle_trait(&mut self, id: &str) -> bool {
        let selected = self.selection.toggle_trait(id);
        self.fall_back_to_reachable_step();
        selected
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.selection.set_notes(notes)
    }

    pub fn reset(&mut self) {
        self.selection.reset();
        self.step = FlowStep::Categories;
    }

    pub fn can_proceed_from_categories(&self) -> bool {
        self.selection.can_proceed_from_categories()
    }

    pub fn can_proceed_from_traits(&self) -> bool {
        self.selection.can_proceed_from_traits()
    }

    pub fn can_enter(&self, step: FlowStep) -> bool {
        self.selection.can_enter(step)
    }

    pub fn resume_step(&self) -> FlowStep {
        self.selection.resume_step()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// The step the session is currently on.
    pub fn step(&self) -> FlowStep {
        self.step
    }

    /// Moves to a neighbouring step.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if `target` is not adjacent to the current step
    /// - `InvariantNotMet` if the selection does not satisfy the step's guard
    pub fn go_to(&mut self, target: FlowStep) -> Result<FlowStep, DomainError> {
        let next = self.step.transition_to(target)?;
        self.check_step(next)?;
        tracing::debug!(from = %self.step, to = %next, "Step changed");
        self.step = next;
        Ok(next)
    }

    /// Explains why `step` cannot be entered yet.
    pub fn check_step(&self, step: FlowStep) -> Result<(), DomainError> {
        if self.can_enter(step) {
            return Ok(());
        }

        let state = self.selection.state();
        let error = if !self.can_proceed_from_categories() {
            DomainError::new(
                ErrorCode::InvariantNotMet,
                format!("Select between 1 and {} categories first", MAX_CATEGORIES),
            )
            .with_detail("selected_categories", state.category_ids().len().to_string())
        } else {
            DomainError::new(
                ErrorCode::InvariantNotMet,
                format!("Select at least {} traits first", MIN_TRAITS),
            )
            .with_detail("selected_traits", state.trait_ids().len().to_string())
        };
        Err(error.with_detail("step", step.to_string()))
    }

    fn fall_back_to_reachable_step(&mut self) {
        if !self.can_enter(self.step) {
            let resumed = self.resume_step();
            tracing::debug!(from = %self.step, to = %resumed, "Step no longer reachable");
            self.step = resumed;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scoring
    // ─────────────────────────────────────────────────────────────────────────

    /// Every role ranked against the current selection.
    ///
    /// Recomputed only when the selection revision changed.
    pub fn ranked_roles(&mut self) -> Vec<ScoredRole<'_>> {
        let revision = self.selection.revision();
        let stale = self
            .ranking
            .as_ref()
            .map_or(true, |cache| cache.revision != revision);

        if stale {
            tracing::debug!(revision, roles = self.catalog.roles().len(), "Ranking roles");
            self.ranking = Some(RankingCache {
                revision,
                ranks: ScoringEngine::rank(self.selection.state(), &self.catalog),
            });
        }

        let ranks = self
            .ranking
            .as_ref()
            .map(|cache| cache.ranks.as_slice())
            .unwrap_or_default();
        ScoringEngine::resolve(ranks, &self.catalog)
    }

    /// The best `n` roles.
    pub fn top_roles(&mut self, n: usize) -> Vec<ScoredRole<'_>> {
        let mut ranked = self.ranked_roles();
        ranked.truncate(n);
        ranked
    }

    /// The roles shown in the summary view.
    pub fn summary_roles(&mut self) -> Vec<ScoredRole<'_>> {
        self.top_roles(SUMMARY_LIMIT)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Diagnostics
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_degraded(&self) -> bool {
        self.selection.is_degraded()
    }

    /// Recovered failures the caller may want to surface.
    pub fn warnings(&self) -> Vec<DomainError> {
        let mut warnings = Vec::new();
        if self.origin.is_fixture() {
            warnings.push(DomainError::new(
                ErrorCode::ReferenceDataUnavailable,
                "No reference data source could be loaded; using the built-in dataset",
            ));
        }
        if self.is_degraded() {
            warnings.push(DomainError::new(
                ErrorCode::PersistenceUnavailable,
                "Selections are kept for this session only",
            ));
        }
        warnings
    }
}

/// Builds the key-value store selected by configuration.
pub fn store_for(config: &StorageConfig) -> Arc<dyn KeyValueStore> {
    match config.backend {
        StorageBackend::File => Arc::new(FileKeyValueStore::new(config.directory_path())),
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
    }
}
