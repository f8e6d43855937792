//! Logging setup using tracing + tracing-subscriber
//!
//! Features:
//! - Human-readable or JSON output on stderr
//! - Per-module log levels via RUST_LOG, falling back to the configured level
//! - Verbosity overrides from the command line

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Errors that can occur while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter { directive: String, message: String },

    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Initialize the global subscriber.
///
/// `verbose` raises the level above the configured one (1 = debug, 2+ = trace).
pub fn init(config: &LoggingConfig, verbose: u8) -> Result<(), TelemetryError> {
    let filter = build_env_filter(&config.level, verbose)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(build_console_layer(config.json))
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}

/// Picks the filter directive: CLI verbosity, then RUST_LOG, then config.
fn effective_directive(configured: &str, verbose: u8, rust_log: Option<String>) -> String {
    match verbose {
        0 => rust_log
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| configured.to_string()),
        1 => Level::DEBUG.to_string().to_lowercase(),
        _ => Level::TRACE.to_string().to_lowercase(),
    }
}

fn build_env_filter(configured: &str, verbose: u8) -> Result<EnvFilter, TelemetryError> {
    let directive = effective_directive(
        configured,
        verbose,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );

    let filter = EnvFilter::try_new(&directive).map_err(|e| TelemetryError::InvalidFilter {
        directive: directive.clone(),
        message: e.to_string(),
    })?;

    // Reduce noise from the HTTP stack
    Ok(match "hyper=warn".parse() {
        Ok(quiet_hyper) => filter.add_directive(quiet_hyper),
        Err(_) => filter,
    })
}

fn build_console_layer<S>(json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if json {
        Box::new(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
    } else {
        Box::new(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_is_the_default() {
        assert_eq!(effective_directive("warn", 0, None), "warn");
        assert_eq!(effective_directive("warn", 0, Some(" ".to_string())), "warn");
    }

    #[test]
    fn test_rust_log_overrides_config() {
        assert_eq!(
            effective_directive("warn", 0, Some("role_compass=trace".to_string())),
            "role_compass=trace"
        );
    }

    #[test]
    fn test_verbosity_overrides_everything() {
        assert_eq!(effective_directive("warn", 1, Some("error".to_string())), "debug");
        assert_eq!(effective_directive("warn", 3, None), "trace");
    }

    #[test]
    fn test_invalid_directive_is_reported() {
        let err = build_env_filter("role_compass=loud", 0);
        if std::env::var(EnvFilter::DEFAULT_ENV).is_err() {
            assert!(matches!(err, Err(TelemetryError::InvalidFilter { .. })));
        }
    }
}
