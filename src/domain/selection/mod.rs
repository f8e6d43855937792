//! Selection Module - The user's progress through the guided flow.

mod state;
mod step;

pub use state::{CategoryToggle, PersistedSelection, SelectionState, MAX_CATEGORIES, MIN_TRAITS};
pub use step::FlowStep;
