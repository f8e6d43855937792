//! Scoring Module - Fit scores and labels for roles.

mod engine;
mod score;

pub use engine::{ScoringEngine, LIST_VIEW_LIMIT, MAX_ROLE_TRAITS, SUMMARY_LIMIT};
pub use score::{
    MatchLabel, RoleRank, RoleScore, ScoredRole, EXCELLENT_THRESHOLD, GOOD_THRESHOLD,
    STRONG_THRESHOLD,
};
