//! Scoring Engine - Fit scores for roles against a selection.

use crate::domain::catalog::{Catalog, Role};
use crate::domain::foundation::Percentage;
use crate::domain::selection::SelectionState;

use super::{RoleRank, RoleScore, ScoredRole};

/// Number of role traits considered when matching.
pub const MAX_ROLE_TRAITS: usize = 12;

/// Conventional prefix for the full role list.
pub const LIST_VIEW_LIMIT: usize = 30;

/// Conventional prefix for the summary view.
pub const SUMMARY_LIMIT: usize = 8;

const BOOST_FACTOR: f64 = 1.15;
const BOOST_OFFSET: f64 = 6.0;

/// Scores roles against the user's trait and category selection.
///
/// All functions are pure: the same inputs always produce the same output.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores one role.
    ///
    /// Hits come from two passes over the lowercase names of the selected
    /// traits. Pass A checks the role's own traits (first twelve), Pass B
    /// looks for each name inside the role's title, rationale and keywords.
    /// A matching trait may count in both passes.
    pub fn score_role(role: &Role, selection: &SelectionState, catalog: &Catalog) -> RoleScore {
        let keywords = Self::keyword_set(selection, catalog);

        let mut hits = 0usize;
        let mut denom = 0usize;

        let considered = role.trait_ids.len().min(MAX_ROLE_TRAITS);
        denom += considered;
        for id in &role.trait_ids[..considered] {
            let matched = catalog
                .traits_by_id(id)
                .map(|t| t.name.to_lowercase())
                .is_some_and(|name| keywords.contains(&name));
            if matched {
                hits += 1;
            }
        }

        let haystack = Self::haystack(role);
        for keyword in &keywords {
            if haystack.contains(keyword.as_str()) {
                hits += 1;
                denom += 1;
            }
        }

        if denom == 0 {
            denom = keywords.len().max(1);
        }

        let mut pct = Percentage::from_rounded(100.0 * hits as f64 / denom as f64);

        if Self::category_matches(role, selection, catalog) {
            pct = Self::apply_category_boost(pct);
        }

        RoleScore::new(pct)
    }

    /// Boosts a score for a role in one of the selected categories.
    ///
    /// The result never exceeds 100.
    pub fn apply_category_boost(pct: Percentage) -> Percentage {
        Percentage::from_rounded(f64::from(pct.value()) * BOOST_FACTOR + BOOST_OFFSET)
    }

    /// Ranks every role, highest score first.
    ///
    /// Equal scores keep catalog order.
    pub fn rank(selection: &SelectionState, catalog: &Catalog) -> Vec<RoleRank> {
        let mut ranked: Vec<RoleRank> = catalog
            .roles()
            .iter()
            .enumerate()
            .map(|(index, role)| RoleRank {
                index,
                score: Self::score_role(role, selection, catalog),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.score.cmp(&a.score.score));
        ranked
    }

    /// Scores and ranks every role in the catalog.
    pub fn score_all_roles<'a>(
        selection: &SelectionState,
        catalog: &'a Catalog,
    ) -> Vec<ScoredRole<'a>> {
        Self::resolve(&Self::rank(selection, catalog), catalog)
    }

    /// Resolves ranks back to catalog roles, skipping stale indices.
    pub fn resolve<'a>(ranks: &[RoleRank], catalog: &'a Catalog) -> Vec<ScoredRole<'a>> {
        ranks
            .iter()
            .filter_map(|rank| {
                catalog.roles().get(rank.index).map(|role| ScoredRole {
                    role,
                    score: rank.score,
                })
            })
            .collect()
    }

    /// The first `n` entries of a ranking.
    pub fn top<'r, 'a>(ranked: &'r [ScoredRole<'a>], n: usize) -> &'r [ScoredRole<'a>] {
        &ranked[..n.min(ranked.len())]
    }

    /// Lowercase names of the selected traits, deduplicated in selection order.
    fn keyword_set(selection: &SelectionState, catalog: &Catalog) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::with_capacity(selection.trait_ids().len());
        for name in selection
            .trait_ids()
            .iter()
            .filter_map(|id| catalog.traits_by_id(id))
            .map(|t| t.name.to_lowercase())
        {
            if !keywords.contains(&name) {
                keywords.push(name);
            }
        }
        keywords
    }

    fn haystack(role: &Role) -> String {
        format!("{} {} {}", role.title, role.why, role.keywords.join(" ")).to_lowercase()
    }

    fn category_matches(role: &Role, selection: &SelectionState, catalog: &Catalog) -> bool {
        let Some(role_category) = role.category.as_deref() else {
            return false;
        };
        let role_category = role_category.to_lowercase();

        selection.category_ids().iter().any(|id| {
            let name = catalog
                .category(id)
                .map(|c| c.name.as_str())
                .unwrap_or(id.as_str())
                .to_lowercase();
            !name.is_empty() && role_category.contains(&name)
        })
    }
}
