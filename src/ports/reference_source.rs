//! Reference Source Port - Interface for fetching raw reference documents.
//!
//! A source yields one parsed document (categories, traits and roles in
//! whatever loose shape the publisher chose). Normalization happens later.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Errors that can occur while fetching a reference document
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error reading {location}: {message}")]
    Io { location: String, message: String },

    #[error("HTTP error fetching {location}: {message}")]
    Http { location: String, message: String },

    #[error("{location} responded with status {status}")]
    Status { location: String, status: u16 },

    #[error("Failed to parse {location}: {message}")]
    Parse { location: String, message: String },

    #[error("Malformed document at {location}: {message}")]
    Malformed { location: String, message: String },
}

impl SourceError {
    pub fn malformed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Port for fetching one reference document.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Fetches and parses the document.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the document is missing, unreachable or
    /// cannot be parsed.
    async fn fetch(&self) -> Result<JsonValue, SourceError>;

    /// Human-readable location used in logs.
    fn describe(&self) -> String;
}
