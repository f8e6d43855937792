//! Reference data loader.
//!
//! Resolves the bundle document and the optional roles document from their
//! candidate sources. Candidates are tried strictly in priority order; the
//! first well-formed document wins and later candidates are never started.

use reqwest::Client;
use serde_json::Value as JsonValue;
use std::fmt;

use crate::adapters::reference::source_for;
use crate::config::DataConfig;
use crate::domain::catalog::{fixture_catalog, Catalog, DataNormalizer, Role};
use crate::ports::{ReferenceSource, SourceError};

const BUNDLE_SECTIONS: &[&str] = &["categories", "traits", "roles"];

/// Where the session's catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// A bundle document loaded from the given location.
    Bundle { location: String },
    /// The built-in fixture dataset.
    Fixture,
}

impl CatalogOrigin {
    pub fn is_fixture(&self) -> bool {
        matches!(self, CatalogOrigin::Fixture)
    }
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogOrigin::Bundle { location } => write!(f, "{}", location),
            CatalogOrigin::Fixture => write!(f, "built-in fixture"),
        }
    }
}

/// A loaded catalog and where its parts came from.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub origin: CatalogOrigin,
    /// Location of the roles document, if one replaced the bundle's roles.
    pub roles_location: Option<String>,
}

/// Loads the session catalog from configured sources.
pub struct ReferenceDataLoader {
    bundle_sources: Vec<Box<dyn ReferenceSource>>,
    role_sources: Vec<Box<dyn ReferenceSource>>,
}

impl ReferenceDataLoader {
    pub fn new(
        bundle_sources: Vec<Box<dyn ReferenceSource>>,
        role_sources: Vec<Box<dyn ReferenceSource>>,
    ) -> Self {
        Self {
            bundle_sources,
            role_sources,
        }
    }

    /// Builds a loader from configured locations sharing one HTTP client.
    pub fn from_config(config: &DataConfig) -> Self {
        let client = Client::new();
        let timeout = config.http_timeout();
        let build = |locations: Vec<String>| {
            locations
                .iter()
                .map(|location| source_for(location, timeout, &client))
                .collect::<Vec<_>>()
        };

        Self::new(
            build(config.bundle_sources_list()),
            build(config.role_sources_list()),
        )
    }

    /// Loads the catalog. Never fails: without a bundle the fixture is used.
    pub async fn load(&self) -> LoadedCatalog {
        let (catalog, origin) = match self.first_bundle().await {
            Some((location, bundle)) => {
                let catalog = DataNormalizer::catalog_from_bundle(&bundle);
                tracing::info!(
                    source = %location,
                    categories = catalog.categories().len(),
                    traits = catalog.traits().len(),
                    roles = catalog.roles().len(),
                    "Reference bundle loaded"
                );
                (catalog, CatalogOrigin::Bundle { location })
            }
            None => {
                tracing::warn!(
                    candidates = self.bundle_sources.len(),
                    "No reference bundle available, using built-in fixture"
                );
                (fixture_catalog(), CatalogOrigin::Fixture)
            }
        };

        match self.first_roles().await {
            Some((location, roles)) => {
                tracing::info!(source = %location, roles = roles.len(), "Roles document loaded");
                LoadedCatalog {
                    catalog: catalog.with_roles(roles),
                    origin,
                    roles_location: Some(location),
                }
            }
            None => LoadedCatalog {
                catalog,
                origin,
                roles_location: None,
            },
        }
    }

    async fn first_bundle(&self) -> Option<(String, JsonValue)> {
        for source in &self.bundle_sources {
            let location = source.describe();
            match source.fetch().await {
                Ok(doc) if is_well_formed_bundle(&doc) => return Some((location, doc)),
                Ok(_) => log_miss(&SourceError::malformed(
                    location,
                    "expected an object with categories, traits or roles",
                )),
                Err(err) => log_miss(&err),
            }
        }
        None
    }

    async fn first_roles(&self) -> Option<(String, Vec<Role>)> {
        for source in &self.role_sources {
            let location = source.describe();
            match source.fetch().await {
                Ok(doc) => {
                    let roles = DataNormalizer::normalize_roles(roles_section(&doc));
                    if !roles.is_empty() {
                        return Some((location, roles));
                    }
                    log_miss(&SourceError::malformed(location, "no roles"));
                }
                Err(err) => log_miss(&err),
            }
        }
        None
    }
}

/// A bundle is an object with at least one section as an array or object.
pub fn is_well_formed_bundle(doc: &JsonValue) -> bool {
    let Some(object) = doc.as_object() else {
        return false;
    };
    BUNDLE_SECTIONS.iter().any(|section| {
        object
            .get(*section)
            .is_some_and(|value| value.is_array() || value.is_object())
    })
}

/// A roles document is either the list itself or an object with a `roles` key.
fn roles_section(doc: &JsonValue) -> &JsonValue {
    match doc.get("roles") {
        Some(roles) if doc.is_object() => roles,
        _ => doc,
    }
}

fn log_miss(err: &SourceError) {
    tracing::debug!(error = %err, "Reference source skipped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns a canned result and counts how often it was fetched.
    struct StubSource {
        name: &'static str,
        result: Result<JsonValue, ()>,
        calls: Arc<AtomicUsize>,
    }

    impl StubSource {
        fn ok(name: &'static str, doc: JsonValue) -> (Box<dyn ReferenceSource>, Arc<AtomicUsize>) {
            Self::boxed(name, Ok(doc))
        }

        fn failing(name: &'static str) -> (Box<dyn ReferenceSource>, Arc<AtomicUsize>) {
            Self::boxed(name, Err(()))
        }

        fn boxed(
            name: &'static str,
            result: Result<JsonValue, ()>,
        ) -> (Box<dyn ReferenceSource>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = StubSource {
                name,
                result,
                calls: calls.clone(),
            };
            (Box::new(source), calls)
        }
    }

    #[async_trait]
    impl ReferenceSource for StubSource {
        async fn fetch(&self) -> Result<JsonValue, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().map_err(|_| SourceError::Io {
                location: self.name.to_string(),
                message: "not found".to_string(),
            })
        }

        fn describe(&self) -> String {
            self.name.to_string()
        }
    }

    fn bundle(category: &str) -> JsonValue {
        json!({
            "categories": [category],
            "traits": [{"name": "Curious", "categoryId": "category-0"}],
            "roles": [{"title": "Researcher", "traits": ["curious"]}]
        })
    }

    #[tokio::test]
    async fn first_well_formed_bundle_wins_and_later_sources_are_never_tried() {
        let (missing, missing_calls) = StubSource::failing("missing.json");
        let (first, first_calls) = StubSource::ok("first.json", bundle("Mind"));
        let (second, second_calls) = StubSource::ok("second.json", bundle("Heart"));
        let loader = ReferenceDataLoader::new(vec![missing, first, second], vec![]);

        let loaded = loader.load().await;

        assert_eq!(
            loaded.origin,
            CatalogOrigin::Bundle {
                location: "first.json".to_string()
            }
        );
        assert_eq!(loaded.catalog.categories()[0].name, "Mind");
        assert_eq!(missing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_bundle_is_skipped() {
        let (junk, _) = StubSource::ok("junk.json", json!(["not", "a", "bundle"]));
        let (good, _) = StubSource::ok("good.json", bundle("Mind"));
        let loader = ReferenceDataLoader::new(vec![junk, good], vec![]);

        let loaded = loader.load().await;

        assert_eq!(loaded.origin.to_string(), "good.json");
    }

    #[tokio::test]
    async fn all_sources_failing_falls_back_to_fixture() {
        let (a, _) = StubSource::failing("a.json");
        let (b, _) = StubSource::ok("b.json", json!({"unrelated": true}));
        let loader = ReferenceDataLoader::new(vec![a, b], vec![]);

        let loaded = loader.load().await;

        assert!(loaded.origin.is_fixture());
        assert_eq!(loaded.catalog.categories().len(), fixture_catalog().categories().len());
        assert_eq!(loaded.roles_location, None);
    }

    #[tokio::test]
    async fn roles_document_replaces_bundle_roles() {
        let (bundle_source, _) = StubSource::ok("bundle.json", bundle("Mind"));
        let (roles_source, _) = StubSource::ok(
            "roles.json",
            json!([{"title": "Analyst"}, {"title": "Designer"}]),
        );
        let loader = ReferenceDataLoader::new(vec![bundle_source], vec![roles_source]);

        let loaded = loader.load().await;

        let titles: Vec<&str> = loaded.catalog.roles().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Analyst", "Designer"]);
        assert_eq!(loaded.roles_location.as_deref(), Some("roles.json"));
        assert_eq!(loaded.catalog.categories()[0].name, "Mind");
    }

    #[tokio::test]
    async fn empty_roles_document_keeps_bundle_roles() {
        let (bundle_source, _) = StubSource::ok("bundle.json", bundle("Mind"));
        let (empty, _) = StubSource::ok("empty.json", json!([]));
        let (wrapped, _) = StubSource::ok("wrapped.json", json!({"roles": [{"title": "Chef"}]}));
        let loader = ReferenceDataLoader::new(vec![bundle_source], vec![empty, wrapped]);

        let loaded = loader.load().await;

        assert_eq!(loaded.catalog.roles()[0].title, "Chef");
        assert_eq!(loaded.roles_location.as_deref(), Some("wrapped.json"));
    }

    #[tokio::test]
    async fn roles_document_applies_to_fixture_too() {
        let (roles_source, _) = StubSource::ok("roles.json", json!([{"title": "Pilot"}]));
        let loader = ReferenceDataLoader::new(vec![], vec![roles_source]);

        let loaded = loader.load().await;

        assert!(loaded.origin.is_fixture());
        assert_eq!(loaded.catalog.roles().len(), 1);
        assert_eq!(loaded.catalog.traits().len(), fixture_catalog().traits().len());
    }

    #[test]
    fn well_formed_bundle_detection() {
        assert!(is_well_formed_bundle(&json!({"categories": []})));
        assert!(is_well_formed_bundle(&json!({"traits": {"mind": []}})));
        assert!(!is_well_formed_bundle(&json!({"roles": "many"})));
        assert!(!is_well_formed_bundle(&json!([])));
        assert!(!is_well_formed_bundle(&json!(null)));
    }
}
