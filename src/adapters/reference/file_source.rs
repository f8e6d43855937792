//! File-based Reference Source Adapter
//!
//! Reads a JSON or YAML reference document from the local filesystem.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::DocumentFormat;
use crate::ports::{ReferenceSource, SourceError};

/// Reference document stored on disk.
#[derive(Debug, Clone)]
pub struct FileReferenceSource {
    path: PathBuf,
}

impl FileReferenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReferenceSource for FileReferenceSource {
    async fn fetch(&self) -> Result<JsonValue, SourceError> {
        let location = self.describe();

        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                location: location.clone(),
                message: e.to_string(),
            })?;

        DocumentFormat::from_location(&location).parse(&location, &text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
