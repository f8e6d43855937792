//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid HTTP timeout (expected 1-300 seconds)")]
    InvalidTimeout,

    #[error("Invalid reference source location: {0}")]
    InvalidSourceLocation(String),

    #[error("Invalid storage namespace: {0}")]
    InvalidNamespace(String),

    #[error("Invalid log level directive: {0}")]
    InvalidLogLevel(String),
}
