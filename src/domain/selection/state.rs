//! Selection state aggregate.
//!
//! Holds the user's progress through the flow: up to two categories in
//! selection order, a set of traits, and free-text notes.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use super::FlowStep;

/// Maximum number of categories selected at once.
pub const MAX_CATEGORIES: usize = 2;

/// Minimum number of traits required to leave the trait step.
pub const MIN_TRAITS: usize = 5;

/// Outcome of toggling a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryToggle {
    Added,
    Removed,
    /// The cap was reached; the oldest selection was evicted to make room.
    Replaced { evicted: String },
}

/// Selection state aggregate.
///
/// # Invariants
///
/// - `category_ids` holds at most [`MAX_CATEGORIES`] distinct ids, oldest first
/// - `trait_ids` contains no duplicates
/// - Any change to `category_ids` clears `trait_ids`
///
/// Deserialization goes through [`PersistedSelection`], which repairs
/// payloads that violate the invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PersistedSelection")]
pub struct SelectionState {
    category_ids: Vec<String>,
    trait_ids: Vec<String>,
    notes: String,
}

impl SelectionState {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from raw parts, repairing invariant violations.
    ///
    /// Duplicate ids are dropped (first occurrence wins) and only the most
    /// recently selected categories are kept when there are too many.
    pub fn from_parts(category_ids: Vec<String>, trait_ids: Vec<String>, notes: String) -> Self {
        let mut category_ids = dedup_in_order(category_ids);
        if category_ids.len() > MAX_CATEGORIES {
            category_ids.drain(..category_ids.len() - MAX_CATEGORIES);
        }

        Self {
            category_ids,
            trait_ids: dedup_in_order(trait_ids),
            notes,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Selected category ids in selection order.
    pub fn category_ids(&self) -> &[String] {
        &self.category_ids
    }

    /// Selected trait ids.
    pub fn trait_ids(&self) -> &[String] {
        &self.trait_ids
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn has_category(&self, id: &str) -> bool {
        self.category_ids.iter().any(|c| c == id)
    }

    pub fn has_trait(&self, id: &str) -> bool {
        self.trait_ids.iter().any(|t| t == id)
    }

    pub fn is_empty(&self) -> bool {
        self.category_ids.is_empty() && self.trait_ids.is_empty() && self.notes.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggles a category, evicting the oldest selection at the cap.
    ///
    /// Every outcome changes the category list, so traits are always cleared.
    pub fn toggle_category(&mut self, id: &str) -> CategoryToggle {
        let outcome = if let Some(pos) = self.category_ids.iter().position(|c| c == id) {
            self.category_ids.remove(pos);
            CategoryToggle::Removed
        } else if self.category_ids.len() < MAX_CATEGORIES {
            self.category_ids.push(id.to_string());
            CategoryToggle::Added
        } else {
            let evicted = self.category_ids.remove(0);
            self.category_ids.push(id.to_string());
            CategoryToggle::Replaced { evicted }
        };

        self.trait_ids.clear();
        outcome
    }

    /// Toggles a trait. Returns whether the trait is selected afterwards.
    pub fn toggle_trait(&mut self, id: &str) -> bool {
        if let Some(pos) = self.trait_ids.iter().position(|t| t == id) {
            self.trait_ids.remove(pos);
            false
        } else {
            self.trait_ids.push(id.to_string());
            true
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Restores the empty defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Step guards
    // ─────────────────────────────────────────────────────────────────────────

    pub fn can_proceed_from_categories(&self) -> bool {
        (1..=MAX_CATEGORIES).contains(&self.category_ids.len())
    }

    pub fn can_proceed_from_traits(&self) -> bool {
        self.trait_ids.len() >= MIN_TRAITS
    }

    /// Returns true if the guards for every step before `step` hold.
    pub fn can_enter(&self, step: FlowStep) -> bool {
        match step {
            FlowStep::Categories => true,
            FlowStep::Traits => self.can_proceed_from_categories(),
            FlowStep::Roles => {
                self.can_proceed_from_categories() && self.can_proceed_from_traits()
            }
        }
    }

    /// The furthest step the current selection allows.
    pub fn resume_step(&self) -> FlowStep {
        FlowStep::ALL
            .iter()
            .rev()
            .copied()
            .find(|step| self.can_enter(*step))
            .unwrap_or(FlowStep::Categories)
    }
}

/// Wire shape of a persisted selection.
///
/// Every field defaults when absent or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedSelection {
    #[serde(deserialize_with = "null_as_default")]
    category_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    trait_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    notes: String,
}

impl From<PersistedSelection> for SelectionState {
    fn from(raw: PersistedSelection) -> Self {
        SelectionState::from_parts(raw.category_ids, raw.trait_ids, raw.notes)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn dedup_in_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
