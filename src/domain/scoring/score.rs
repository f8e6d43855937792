//! Fit score value types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::catalog::Role;
use crate::domain::foundation::Percentage;

/// Minimum score for an "Excellent match".
pub const EXCELLENT_THRESHOLD: u8 = 80;
/// Minimum score for a "Strong match".
pub const STRONG_THRESHOLD: u8 = 60;
/// Minimum score for a "Good match".
pub const GOOD_THRESHOLD: u8 = 40;

/// Human-readable bucket for a fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchLabel {
    Consider,
    #[serde(rename = "Good match")]
    Good,
    #[serde(rename = "Strong match")]
    Strong,
    #[serde(rename = "Excellent match")]
    Excellent,
}

impl MatchLabel {
    /// Buckets a score.
    pub fn for_score(score: Percentage) -> Self {
        match score.value() {
            v if v >= EXCELLENT_THRESHOLD => MatchLabel::Excellent,
            v if v >= STRONG_THRESHOLD => MatchLabel::Strong,
            v if v >= GOOD_THRESHOLD => MatchLabel::Good,
            _ => MatchLabel::Consider,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            MatchLabel::Excellent => "Excellent match",
            MatchLabel::Strong => "Strong match",
            MatchLabel::Good => "Good match",
            MatchLabel::Consider => "Consider",
        }
    }
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A role's fit score and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleScore {
    pub score: Percentage,
    pub label: MatchLabel,
}

impl RoleScore {
    pub fn new(score: Percentage) -> Self {
        Self {
            score,
            label: MatchLabel::for_score(score),
        }
    }
}

/// Position of a role in the catalog together with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRank {
    pub index: usize,
    pub score: RoleScore,
}

/// A role borrowed from the catalog together with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRole<'a> {
    pub role: &'a Role,
    pub score: RoleScore,
}
