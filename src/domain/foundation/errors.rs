//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors raised by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes for conditions reported to callers.
///
/// None of these are fatal. They describe degraded operation or an
/// unmet step guard so a renderer can explain what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Every reference data source failed; the fixture dataset is in use.
    ReferenceDataUnavailable,
    /// Selection state could not be read or written; state lives in memory only.
    PersistenceUnavailable,
    /// A step was requested before its minimum selection was met.
    InvariantNotMet,
    InvalidStateTransition,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ReferenceDataUnavailable => "REFERENCE_DATA_UNAVAILABLE",
            ErrorCode::PersistenceUnavailable => "PERSISTENCE_UNAVAILABLE",
            ErrorCode::InvariantNotMet => "INVARIANT_NOT_MET",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::InvalidStateTransition, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("state_transition", "Cannot go back");
        assert_eq!(
            format!("{}", err),
            "Field 'state_transition' has invalid format: Cannot go back"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::PersistenceUnavailable, "disk full");
        assert_eq!(format!("{}", err), "[PERSISTENCE_UNAVAILABLE] disk full");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ReferenceDataUnavailable, "no source")
            .with_detail("attempted", "3");
        assert_eq!(err.details.get("attempted"), Some(&"3".to_string()));
    }

    #[test]
    fn validation_error_converts_to_transition_error() {
        let err: DomainError = ValidationError::invalid_format("step", "nope").into();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }
}
