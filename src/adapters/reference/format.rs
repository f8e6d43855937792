//! Document format detection and parsing shared by reference sources.

use serde_json::Value as JsonValue;

use crate::ports::SourceError;

/// Wire format of a reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a path or URL. Anything not ending in
    /// `.yaml`/`.yml` is JSON.
    pub fn from_location(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_ascii_lowercase();

        if path.ends_with(".yaml") || path.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        }
    }

    /// Parses `text` into a JSON value.
    pub fn parse(&self, location: &str, text: &str) -> Result<JsonValue, SourceError> {
        let parsed = match self {
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| SourceError::Parse {
            location: location.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_extensions_select_yaml() {
        assert_eq!(DocumentFormat::from_location("data/a.yaml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_location("data/a.YML"), DocumentFormat::Yaml);
        assert_eq!(
            DocumentFormat::from_location("https://host/a.yml?v=2"),
            DocumentFormat::Yaml
        );
    }

    #[test]
    fn everything_else_is_json() {
        assert_eq!(DocumentFormat::from_location("data/a.json"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_location("data/bundle"), DocumentFormat::Json);
    }

    #[test]
    fn yaml_parses_to_the_same_value_as_json() {
        let yaml = "categories:\n  - id: mind\n    name: Mind\n";
        let json_text = r#"{"categories": [{"id": "mind", "name": "Mind"}]}"#;

        let from_yaml = DocumentFormat::Yaml.parse("a.yaml", yaml).unwrap();
        let from_json = DocumentFormat::Json.parse("a.json", json_text).unwrap();

        assert_eq!(from_yaml, from_json);
        assert_eq!(from_json, json!({"categories": [{"id": "mind", "name": "Mind"}]}));
    }

    #[test]
    fn mapping_keys_keep_document_order() {
        let yaml = "zeta:\n  title: Zeta Role\nalpha:\n  title: Alpha Role\n";
        let json_text = r#"{"zeta": {"title": "Zeta Role"}, "alpha": {"title": "Alpha Role"}}"#;

        for doc in [
            DocumentFormat::Yaml.parse("roles.yaml", yaml).unwrap(),
            DocumentFormat::Json.parse("roles.json", json_text).unwrap(),
        ] {
            let keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["zeta", "alpha"]);
        }
    }

    #[test]
    fn invalid_text_is_a_parse_error() {
        let err = DocumentFormat::Json.parse("a.json", "{ nope").unwrap_err();
        assert!(matches!(err, SourceError::Parse { location, .. } if location == "a.json"));
    }
}
