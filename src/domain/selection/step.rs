//! Flow steps of the guided selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// A step of the guided flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStep {
    Categories,
    Traits,
    Roles,
}

impl FlowStep {
    /// All steps in flow order.
    pub const ALL: [FlowStep; 3] = [FlowStep::Categories, FlowStep::Traits, FlowStep::Roles];

    pub fn next(&self) -> Option<FlowStep> {
        match self {
            FlowStep::Categories => Some(FlowStep::Traits),
            FlowStep::Traits => Some(FlowStep::Roles),
            FlowStep::Roles => None,
        }
    }

    pub fn previous(&self) -> Option<FlowStep> {
        match self {
            FlowStep::Categories => None,
            FlowStep::Traits => Some(FlowStep::Categories),
            FlowStep::Roles => Some(FlowStep::Traits),
        }
    }
}

impl StateMachine for FlowStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next().as_ref() == Some(target) || self.previous().as_ref() == Some(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.previous().into_iter().chain(self.next()).collect()
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowStep::Categories => "categories",
            FlowStep::Traits => "traits",
            FlowStep::Roles => "roles",
        };
        write!(f, "{}", s)
    }
}
