//! Reference data configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where reference documents are loaded from
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Bundle document locations in priority order (comma-separated)
    #[serde(default = "default_bundle_sources")]
    pub bundle_sources: String,

    /// Optional roles document locations in priority order (comma-separated)
    #[serde(default = "default_role_sources")]
    pub role_sources: String,

    /// Per-request timeout for HTTP sources in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl DataConfig {
    /// Get bundle source locations as a vector
    pub fn bundle_sources_list(&self) -> Vec<String> {
        split_locations(&self.bundle_sources)
    }

    /// Get roles source locations as a vector
    pub fn role_sources_list(&self) -> Vec<String> {
        split_locations(&self.role_sources)
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validate reference data configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.http_timeout_secs == 0 || self.http_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        for location in self
            .bundle_sources_list()
            .iter()
            .chain(self.role_sources_list().iter())
        {
            if location.chars().any(char::is_whitespace) {
                return Err(ValidationError::InvalidSourceLocation(location.clone()));
            }
        }
        Ok(())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            bundle_sources: default_bundle_sources(),
            role_sources: default_role_sources(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

fn split_locations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_bundle_sources() -> String {
    "data/nova_data.json,./data/nova_data.json,/data/nova_data.json".to_string()
}

fn default_role_sources() -> String {
    "data/roles_400.json".to_string()
}

fn default_http_timeout() -> u64 {
    10
}
