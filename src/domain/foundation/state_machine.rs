//! State machine trait for step and status enums.
//!
//! Provides a consistent interface for validating and performing state transitions.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// let next = FlowStep::Categories.transition_to(FlowStep::Traits)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Off,
        On,
        Broken,
    }

    impl StateMachine for Light {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Light::Off => vec![Light::On],
                Light::On => vec![Light::Off, Light::Broken],
                Light::Broken => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Light::Off.transition_to(Light::On), Ok(Light::On));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Light::Off.transition_to(Light::Broken).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Off to Broken"));
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(Light::Broken.is_terminal());
        assert!(!Light::On.is_terminal());
    }
}
