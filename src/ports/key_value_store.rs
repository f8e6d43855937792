//! Key-Value Store Port - Interface for durable string storage.
//!
//! The selection state is persisted as a single JSON string under a
//! namespaced key. Implementations decide where that string lives.

/// Errors that can occur during key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Port for reading and writing string values by key.
///
/// Operations are synchronous; writes are last-write-wins.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_messages() {
        assert!(StoreError::io("disk full").to_string().contains("disk full"));
        assert!(StoreError::unavailable("quota")
            .to_string()
            .starts_with("Store unavailable"));
        assert!(StoreError::InvalidKey("".into())
            .to_string()
            .contains("Invalid key"));
    }

    #[test]
    fn io_errors_convert() {
        let err: StoreError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, StoreError::Io(msg) if msg.contains("boom")));
    }
}
