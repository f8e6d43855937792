//! Selection storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Selection storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which key-value store backs the selection
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Prefix for every persisted key
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// Key-value store backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl StorageConfig {
    /// Get the storage directory as a path
    pub fn directory_path(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.namespace.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__NAMESPACE"));
        }
        let valid = self
            .namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
        if !valid {
            return Err(ValidationError::InvalidNamespace(self.namespace.clone()));
        }
        if self.backend == StorageBackend::File && self.directory.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__DIRECTORY"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: default_directory(),
            namespace: default_namespace(),
        }
    }
}

fn default_directory() -> String {
    ".role-compass".to_string()
}

fn default_namespace() -> String {
    "nova".to_string()
}
