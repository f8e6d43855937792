//! Built-in fixture dataset used when no reference source can be loaded.
//!
//! Small on purpose: four categories, enough traits per category to pass the
//! trait step, and a handful of roles spread across the categories.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use super::{Catalog, DataNormalizer};

static FIXTURE_CATALOG: Lazy<Catalog> =
    Lazy::new(|| DataNormalizer::catalog_from_bundle(&fixture_bundle()));

/// The fixture dataset as a raw bundle document.
pub fn fixture_bundle() -> Value {
    json!({
        "categories": [
            {"id": "mind", "name": "Mind", "group": "Focus", "summary": "Ideas, analysis and problem solving"},
            {"id": "heart", "name": "Heart", "group": "Focus", "summary": "People, care and connection"},
            {"id": "drive", "name": "Drive", "group": "Focus", "summary": "Building, leading and getting things done"},
            {"id": "spirit", "name": "Spirit", "group": "Focus", "summary": "Meaning, expression and creativity"}
        ],
        "traits": {
            "mind": [
                {"id": "analytical", "name": "Analytical", "desc": "Breaks problems into parts"},
                {"id": "curious", "name": "Curious", "desc": "Wants to know how things work"},
                {"id": "systems-thinker", "name": "Systems Thinker", "desc": "Sees how pieces connect"},
                {"id": "data-driven", "name": "Data-Driven", "desc": "Decides from evidence"},
                {"id": "detail-oriented", "name": "Detail Oriented", "desc": "Notices what others miss"},
                {"id": "logical", "name": "Logical", "desc": "Reasons step by step"}
            ],
            "heart": [
                {"id": "empathetic", "name": "Empathetic", "desc": "Feels with others"},
                {"id": "patient", "name": "Patient", "desc": "Stays calm over the long haul"},
                {"id": "clear-communicator", "name": "Clear Communicator", "desc": "Explains things simply"},
                {"id": "supportive", "name": "Supportive", "desc": "Helps others grow"},
                {"id": "good-listener", "name": "Good Listener", "desc": "Hears what is not said"},
                {"id": "collaborative", "name": "Collaborative", "desc": "Works best in a team"}
            ],
            "drive": [
                {"id": "decisive", "name": "Decisive", "desc": "Commits and moves"},
                {"id": "organized", "name": "Organized", "desc": "Keeps plans on track"},
                {"id": "competitive", "name": "Competitive", "desc": "Plays to win"},
                {"id": "hands-on", "name": "Hands-On", "desc": "Learns by doing"},
                {"id": "resilient", "name": "Resilient", "desc": "Recovers quickly"},
                {"id": "persuasive", "name": "Persuasive", "desc": "Brings people along"}
            ],
            "spirit": [
                {"id": "creative", "name": "Creative", "desc": "Makes new things"},
                {"id": "expressive", "name": "Expressive", "desc": "Shows ideas through form"},
                {"id": "reflective", "name": "Reflective", "desc": "Thinks before acting"},
                {"id": "principled", "name": "Principled", "desc": "Acts on values"},
                {"id": "imaginative", "name": "Imaginative", "desc": "Pictures what could be"},
                {"id": "adaptable", "name": "Adaptable", "desc": "Comfortable with change"}
            ]
        },
        "roles": [
            {
                "id": "data-analyst", "title": "Data Analyst",
                "why": "Turns raw numbers into decisions for a curious, analytical mind.",
                "outlook": "Growing", "salary": "$65k-$95k", "category": "Mind",
                "traits": ["analytical", "data-driven", "detail-oriented", "logical", "curious"],
                "keywords": ["spreadsheets", "sql", "reporting"]
            },
            {
                "id": "systems-engineer", "title": "Systems Engineer",
                "why": "Designs how large technical pieces fit together.",
                "outlook": "Strong", "salary": "$90k-$130k", "category": "Mind",
                "traits": ["systems-thinker", "analytical", "logical", "organized"],
                "keywords": ["architecture", "integration"]
            },
            {
                "id": "counselor", "title": "Counselor",
                "why": "Supports people through hard moments with empathy and patience.",
                "outlook": "Growing", "salary": "$45k-$70k", "category": "Heart",
                "traits": ["empathetic", "patient", "good-listener", "supportive"],
                "keywords": ["wellbeing", "guidance"]
            },
            {
                "id": "teacher", "title": "Teacher",
                "why": "Helps others grow as a clear communicator and a patient guide.",
                "outlook": "Stable", "salary": "$45k-$75k", "category": "Heart",
                "traits": ["clear-communicator", "patient", "supportive", "organized"],
                "keywords": ["classroom", "curriculum"]
            },
            {
                "id": "project-manager", "title": "Project Manager",
                "why": "Keeps teams organized and decisive from kickoff to delivery.",
                "outlook": "Strong", "salary": "$75k-$115k", "category": "Drive",
                "traits": ["organized", "decisive", "clear-communicator", "collaborative", "resilient"],
                "keywords": ["planning", "delivery", "stakeholders"]
            },
            {
                "id": "sales-lead", "title": "Sales Lead",
                "why": "Persuasive, competitive and resilient work with clear targets.",
                "outlook": "Stable", "salary": "$60k-$120k", "category": "Drive",
                "traits": ["persuasive", "competitive", "resilient"],
                "keywords": ["pipeline", "negotiation"]
            },
            {
                "id": "ux-designer", "title": "UX Designer",
                "why": "Creative problem solving grounded in empathy for users.",
                "outlook": "Growing", "salary": "$70k-$110k", "category": "Spirit",
                "traits": ["creative", "empathetic", "imaginative", "curious"],
                "keywords": ["prototyping", "research", "design"]
            },
            {
                "id": "writer", "title": "Writer",
                "why": "Expressive and reflective work shaping ideas into words.",
                "outlook": "Mixed", "salary": "$40k-$85k", "category": "Spirit",
                "traits": ["expressive", "reflective", "imaginative", "principled"],
                "keywords": ["editing", "storytelling"]
            }
        ]
    })
}

/// The fixture dataset, normalized once per process.
pub fn fixture_catalog() -> Catalog {
    FIXTURE_CATALOG.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_has_every_section() {
        let catalog = fixture_catalog();
        assert_eq!(catalog.categories().len(), 4);
        assert_eq!(catalog.traits().len(), 24);
        assert_eq!(catalog.roles().len(), 8);
    }

    #[test]
    fn every_category_offers_enough_traits_to_proceed() {
        let catalog = fixture_catalog();
        for category in catalog.categories() {
            let traits = catalog.traits_for_categories(&[category.id.clone()]);
            assert!(traits.len() >= 5, "{} offers {} traits", category.id, traits.len());
        }
    }

    #[test]
    fn every_role_trait_resolves() {
        let catalog = fixture_catalog();
        for role in catalog.roles() {
            for id in &role.trait_ids {
                assert!(catalog.traits_by_id(id).is_some(), "{} -> {}", role.id, id);
            }
        }
    }
}
