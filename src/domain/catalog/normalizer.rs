//! Data Normalizer - Converts loosely shaped reference records into the canonical model.
//!
//! Reference documents arrive in several shapes: arrays of objects, arrays of
//! bare strings, or objects keyed by id (or, for traits, by category id). Field
//! names vary too. Each canonical field is resolved through an ordered list of
//! candidate source fields; the first present, non-empty candidate wins.
//!
//! # Guarantees
//!
//! - Total: every input produces an output, malformed entries are skipped.
//! - Every record has a non-empty id, unique within one call.
//! - Idempotent: normalizing the serialized output yields the same records.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::model::{CanonicalRecord, Catalog, Category, RecordKind, Role, Trait};

const NAME_FIELDS: &[&str] = &["name", "title", "label", "category", "Category", "cat"];
const DESC_FIELDS: &[&str] = &["subtitle", "sub", "description", "desc"];
const SUMMARY_FIELDS: &[&str] = &["subtitle", "sub", "description", "desc", "summary"];
const GROUP_FIELDS: &[&str] = &["group", "kicker"];
const ID_FIELDS: &[&str] = &["id", "key", "slug"];
const TRAIT_CATEGORY_FIELDS: &[&str] = &["categoryIds", "categoryId", "subcatIds", "category"];
const ROLE_TRAIT_FIELDS: &[&str] = &["traitIds", "traits", "tags"];
const ROLE_WHY_FIELDS: &[&str] = &["why", "summary", "description", "desc"];
const ROLE_OUTLOOK_FIELDS: &[&str] = &["outlook", "outlook_text", "outlook_label", "prospect"];
const ROLE_SALARY_FIELDS: &[&str] = &["salary", "median_salary", "pay", "comp"];
const ROLE_CATEGORY_FIELDS: &[&str] = &["category", "family"];
const ROLE_KEYWORD_FIELDS: &[&str] = &["keywords"];

/// Reference data normalization functions.
pub struct DataNormalizer;

impl DataNormalizer {
    /// Normalizes a raw document of the given kind.
    pub fn normalize(kind: RecordKind, raw: &Value) -> Vec<CanonicalRecord> {
        match kind {
            RecordKind::Category => Self::normalize_categories(raw)
                .into_iter()
                .map(CanonicalRecord::Category)
                .collect(),
            RecordKind::Trait => Self::normalize_traits(raw)
                .into_iter()
                .map(CanonicalRecord::Trait)
                .collect(),
            RecordKind::Role => Self::normalize_roles(raw)
                .into_iter()
                .map(CanonicalRecord::Role)
                .collect(),
        }
    }

    /// Normalizes a bundle document (`{categories, traits, roles}`) into a catalog.
    ///
    /// Missing sections normalize to empty collections.
    pub fn catalog_from_bundle(bundle: &Value) -> Catalog {
        let section = |name: &str| bundle.get(name).unwrap_or(&Value::Null);
        Catalog::new(
            Self::normalize_categories(section("categories")),
            Self::normalize_traits(section("traits")),
            Self::normalize_roles(section("roles")),
        )
    }

    /// Normalizes a categories document.
    pub fn normalize_categories(raw: &Value) -> Vec<Category> {
        let kind = RecordKind::Category;
        let mut ids = IdAllocator::default();

        collect_records(kind, raw)
            .into_iter()
            .map(|RawRecord { index, entry, key }| match entry {
                Entry::Bare(name) => Category {
                    id: ids.claim(bare_id(kind, index, key), index),
                    name,
                    group: None,
                    summary: None,
                },
                Entry::Object(fields) => {
                    let name = first_scalar(fields, NAME_FIELDS);
                    let id = object_id(kind, index, key, fields, name.as_deref());
                    Category {
                        id: ids.claim(id, index),
                        name: name.unwrap_or_else(|| kind.label().to_string()),
                        group: first_scalar(fields, GROUP_FIELDS),
                        summary: first_scalar(fields, SUMMARY_FIELDS),
                    }
                }
            })
            .collect()
    }

    /// Normalizes a traits document.
    ///
    /// When the document is keyed by category id, each trait inherits the key
    /// as its category unless it names categories of its own.
    pub fn normalize_traits(raw: &Value) -> Vec<Trait> {
        let kind = RecordKind::Trait;
        let mut ids = IdAllocator::default();

        collect_records(kind, raw)
            .into_iter()
            .map(|RawRecord { index, entry, key }| {
                let inherited: Vec<String> = key.map(str::to_string).into_iter().collect();
                match entry {
                    Entry::Bare(name) => Trait {
                        id: ids.claim(bare_id(kind, index, key), index),
                        name,
                        desc: None,
                        category_ids: inherited,
                    },
                    Entry::Object(fields) => {
                        let name = first_scalar(fields, NAME_FIELDS);
                        let id = object_id(kind, index, key, fields, name.as_deref());
                        let mut category_ids = first_id_list(fields, TRAIT_CATEGORY_FIELDS);
                        if category_ids.is_empty() {
                            category_ids = inherited;
                        }
                        Trait {
                            id: ids.claim(id, index),
                            name: name.unwrap_or_else(|| kind.label().to_string()),
                            desc: first_scalar(fields, DESC_FIELDS),
                            category_ids,
                        }
                    }
                }
            })
            .collect()
    }

    /// Normalizes a roles document.
    pub fn normalize_roles(raw: &Value) -> Vec<Role> {
        let kind = RecordKind::Role;
        let mut ids = IdAllocator::default();

        collect_records(kind, raw)
            .into_iter()
            .map(|RawRecord { index, entry, key }| match entry {
                Entry::Bare(title) => Role {
                    id: ids.claim(bare_id(kind, index, key), index),
                    title,
                    why: String::new(),
                    outlook: String::new(),
                    salary: String::new(),
                    category: None,
                    trait_ids: Vec::new(),
                    keywords: Vec::new(),
                },
                Entry::Object(fields) => {
                    let title = first_scalar(fields, NAME_FIELDS);
                    let id = object_id(kind, index, key, fields, title.as_deref());
                    Role {
                        id: ids.claim(id, index),
                        title: title.unwrap_or_else(|| kind.label().to_string()),
                        why: first_scalar(fields, ROLE_WHY_FIELDS).unwrap_or_default(),
                        outlook: first_scalar(fields, ROLE_OUTLOOK_FIELDS).unwrap_or_default(),
                        salary: first_scalar(fields, ROLE_SALARY_FIELDS).unwrap_or_default(),
                        category: first_scalar(fields, ROLE_CATEGORY_FIELDS),
                        trait_ids: first_id_list(fields, ROLE_TRAIT_FIELDS),
                        keywords: first_keyword_list(fields, ROLE_KEYWORD_FIELDS),
                    }
                }
            })
            .collect()
    }
}

/// Lowercases a name and collapses runs of non-alphanumeric characters to `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw record collection
// ─────────────────────────────────────────────────────────────────────────────

enum Entry<'a> {
    Bare(String),
    Object(&'a Map<String, Value>),
}

struct RawRecord<'a> {
    index: usize,
    entry: Entry<'a>,
    /// Key of the enclosing object, when the document was keyed.
    key: Option<&'a str>,
}

fn collect_records(kind: RecordKind, raw: &Value) -> Vec<RawRecord<'_>> {
    let mut records = Vec::new();

    match raw {
        Value::Array(items) => {
            for item in items {
                push_record(&mut records, item, None);
            }
        }
        Value::Object(map) => {
            for (key, value) in map {
                let key = Some(key.trim()).filter(|k| !k.is_empty());
                match (kind, value) {
                    (RecordKind::Trait, Value::Array(items)) => {
                        for item in items {
                            push_record(&mut records, item, key);
                        }
                    }
                    _ => push_record(&mut records, value, key),
                }
            }
        }
        _ => {}
    }

    records
}

fn push_record<'a>(records: &mut Vec<RawRecord<'a>>, item: &'a Value, key: Option<&'a str>) {
    let entry = match item {
        Value::Object(fields) => Entry::Object(fields),
        other => match scalar(other) {
            Some(name) => Entry::Bare(name),
            None => return,
        },
    };

    records.push(RawRecord {
        index: records.len(),
        entry,
        key,
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Id derivation
// ─────────────────────────────────────────────────────────────────────────────

fn index_id(kind: RecordKind, index: usize) -> String {
    format!("{}-{}", kind.id_prefix(), index)
}

/// Keys of trait documents are category ids, never record ids.
fn key_as_id(kind: RecordKind, key: Option<&str>) -> Option<String> {
    match kind {
        RecordKind::Trait => None,
        _ => key.map(str::to_string),
    }
}

fn bare_id(kind: RecordKind, index: usize, key: Option<&str>) -> String {
    key_as_id(kind, key).unwrap_or_else(|| index_id(kind, index))
}

fn object_id(
    kind: RecordKind,
    index: usize,
    key: Option<&str>,
    fields: &Map<String, Value>,
    name: Option<&str>,
) -> String {
    first_scalar(fields, ID_FIELDS)
        .or_else(|| key_as_id(kind, key))
        .or_else(|| name.map(slugify).filter(|slug| !slug.is_empty()))
        .unwrap_or_else(|| index_id(kind, index))
}

/// Hands out ids unique within one normalization call.
#[derive(Default)]
struct IdAllocator {
    seen: HashSet<String>,
}

impl IdAllocator {
    /// Claims `candidate`, appending `-<index>` until it no longer collides.
    fn claim(&mut self, candidate: String, index: usize) -> String {
        let mut id = candidate;
        while self.seen.contains(&id) {
            id = format!("{}-{}", id, index);
        }
        self.seen.insert(id.clone());
        id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Strings (trimmed, non-empty) and numbers count as scalar values.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_scalar(fields: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|name| fields.get(*name))
        .find_map(scalar)
}

fn first_id_list(fields: &Map<String, Value>, candidates: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .filter_map(|name| fields.get(*name))
        .map(id_list)
        .find(|ids| !ids.is_empty())
        .unwrap_or_default()
}

fn first_keyword_list(fields: &Map<String, Value>, candidates: &[&str]) -> Vec<String> {
    candidates
        .iter()
        .filter_map(|name| fields.get(*name))
        .map(keyword_list)
        .find(|keywords| !keywords.is_empty())
        .unwrap_or_default()
}

/// Accepts a single id, an object carrying `id`, or an array of either.
fn id_list(value: &Value) -> Vec<String> {
    let ids: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(id_of).collect(),
        other => id_of(other).into_iter().collect(),
    };
    dedup_in_order(ids)
}

fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => obj.get("id").and_then(scalar),
        other => scalar(other),
    }
}

/// Accepts an array of words or a comma-separated string.
fn keyword_list(value: &Value) -> Vec<String> {
    let keywords: Vec<String> = match value {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items.iter().filter_map(scalar).collect(),
        _ => Vec::new(),
    };
    dedup_in_order(keywords)
}

fn dedup_in_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
