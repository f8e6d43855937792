//! Canonical reference data model and the lookup maps built over it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A top-level focus area the user picks (at most two).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A descriptive attribute scoped to one or more categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trait {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
}

impl Trait {
    /// Returns true if this trait is scoped to any of the given categories.
    pub fn belongs_to_any(&self, category_ids: &[String]) -> bool {
        self.category_ids.iter().any(|id| category_ids.contains(id))
    }
}

/// A candidate outcome scored against the user's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub outlook: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub trait_ids: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Which kind of reference record a document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Category,
    Trait,
    Role,
}

impl RecordKind {
    /// Display name used when a record carries no name at all.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Category => "Category",
            RecordKind::Trait => "Trait",
            RecordKind::Role => "Role",
        }
    }

    /// Prefix for index-derived ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            RecordKind::Category => "category",
            RecordKind::Trait => "trait",
            RecordKind::Role => "role",
        }
    }
}

/// A normalized record of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CanonicalRecord {
    Category(Category),
    Trait(Trait),
    Role(Role),
}

impl CanonicalRecord {
    pub fn id(&self) -> &str {
        match self {
            CanonicalRecord::Category(c) => &c.id,
            CanonicalRecord::Trait(t) => &t.id,
            CanonicalRecord::Role(r) => &r.id,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            CanonicalRecord::Category(_) => RecordKind::Category,
            CanonicalRecord::Trait(_) => RecordKind::Trait,
            CanonicalRecord::Role(_) => RecordKind::Role,
        }
    }
}

/// The canonical reference dataset for one session.
///
/// Built once after normalization and read-only afterwards. Lookup maps
/// index into the record vectors so dataset order is preserved for ranking.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    traits: Vec<Trait>,
    roles: Vec<Role>,
    categories_by_id: HashMap<String, usize>,
    traits_by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog and its lookup maps.
    ///
    /// If ids repeat (only possible for hand-built input), the first record wins.
    pub fn new(categories: Vec<Category>, traits: Vec<Trait>, roles: Vec<Role>) -> Self {
        let mut categories_by_id = HashMap::with_capacity(categories.len());
        for (idx, category) in categories.iter().enumerate() {
            categories_by_id.entry(category.id.clone()).or_insert(idx);
        }

        let mut traits_by_id = HashMap::with_capacity(traits.len());
        for (idx, t) in traits.iter().enumerate() {
            traits_by_id.entry(t.id.clone()).or_insert(idx);
        }

        Self {
            categories,
            traits,
            roles,
            categories_by_id,
            traits_by_id,
        }
    }

    /// Returns a copy of this catalog with its roles replaced.
    pub fn with_roles(self, roles: Vec<Role>) -> Self {
        Self::new(self.categories, self.traits, roles)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories_by_id.get(id).map(|&idx| &self.categories[idx])
    }

    /// Resolves a trait id.
    pub fn traits_by_id(&self, id: &str) -> Option<&Trait> {
        self.traits_by_id.get(id).map(|&idx| &self.traits[idx])
    }

    /// Traits scoped to any of the given categories, in dataset order.
    pub fn traits_for_categories(&self, category_ids: &[String]) -> Vec<&Trait> {
        self.traits
            .iter()
            .filter(|t| t.belongs_to_any(category_ids))
            .collect()
    }

    /// Names of the given categories, skipping ids that do not resolve.
    pub fn category_names(&self, category_ids: &[String]) -> Vec<&str> {
        category_ids
            .iter()
            .filter_map(|id| self.category(id))
            .map(|c| c.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            group: None,
            summary: None,
        }
    }

    fn trait_in(id: &str, name: &str, cats: &[&str]) -> Trait {
        Trait {
            id: id.to_string(),
            name: name.to_string(),
            desc: None,
            category_ids: cats.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn lookups_resolve_by_id() {
        let catalog = Catalog::new(
            vec![category("tech", "Technology")],
            vec![trait_in("t1", "Curious", &["tech"])],
            vec![],
        );

        assert_eq!(catalog.category("tech").map(|c| c.name.as_str()), Some("Technology"));
        assert_eq!(catalog.traits_by_id("t1").map(|t| t.name.as_str()), Some("Curious"));
        assert!(catalog.traits_by_id("missing").is_none());
    }

    #[test]
    fn duplicate_ids_resolve_to_first_record() {
        let catalog = Catalog::new(
            vec![category("a", "First"), category("a", "Second")],
            vec![],
            vec![],
        );
        assert_eq!(catalog.category("a").unwrap().name, "First");
    }

    #[test]
    fn traits_for_categories_keeps_dataset_order() {
        let catalog = Catalog::new(
            vec![],
            vec![
                trait_in("t1", "One", &["b"]),
                trait_in("t2", "Two", &["a"]),
                trait_in("t3", "Three", &["c"]),
                trait_in("t4", "Four", &["a", "b"]),
            ],
            vec![],
        );

        let ids: Vec<&str> = catalog
            .traits_for_categories(&["a".to_string(), "b".to_string()])
            .iter()
            .map(|t| t.id.as_str())
            .collect();

        assert_eq!(ids, vec!["t1", "t2", "t4"]);
    }

    #[test]
    fn category_names_skip_unknown_ids() {
        let catalog = Catalog::new(vec![category("x", "Ex")], vec![], vec![]);
        let names = catalog.category_names(&["nope".to_string(), "x".to_string()]);
        assert_eq!(names, vec!["Ex"]);
    }

    #[test]
    fn canonical_records_serialize_with_camel_case_fields() {
        let json = serde_json::to_value(CanonicalRecord::Trait(trait_in("t", "T", &["c"]))).unwrap();
        assert_eq!(json["categoryIds"], serde_json::json!(["c"]));
        assert!(json.get("desc").is_none());
    }
}
