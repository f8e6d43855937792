//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ROLE_COMPASS` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use role_compass::config::AppConfig;
//!
//! let config = AppConfig::load_validated().expect("Invalid configuration");
//!
//! println!("Bundle sources: {:?}", config.data.bundle_sources_list());
//! ```

mod data;
mod error;
mod logging;
mod storage;

pub use data::DataConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reference data sources
    #[serde(default)]
    pub data: DataConfig,

    /// Selection storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ROLE_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ROLE_COMPASS__DATA__BUNDLE_SOURCES=a.json,b.json` -> `data.bundle_sources`
    /// - `ROLE_COMPASS__STORAGE__BACKEND=memory` -> `storage.backend`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ROLE_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration and validate it in one step
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` if values cannot be parsed and
    /// `ConfigError::ValidationFailed` if a parsed value is invalid.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.data.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
