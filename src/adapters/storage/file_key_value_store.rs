//! File-based Key-Value Store Adapter
//!
//! Stores each key as one file inside a directory.
//!
//! # Directory Structure
//!
//! ```text
//! {directory}/
//! ├── role_compass.selection.v2.json
//! └── role_compass_state_v1.json
//! ```
//!
//! # Atomic Writes
//!
//! Uses a write-to-temp-then-rename pattern:
//! 1. Write content to `{key}.json.tmp`
//! 2. Sync to disk
//! 3. Rename to `{key}.json`

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::ports::{KeyValueStore, StoreError};

const FILE_EXTENSION: &str = "json";

/// File-based key-value store.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `directory`.
    ///
    /// The directory is created on first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Maps a key to a safe file stem.
    ///
    /// Characters outside `[A-Za-z0-9_.-]` become `_`. Keys that would name
    /// the directory itself or its parent are rejected.
    fn file_stem(key: &str) -> Result<String, StoreError> {
        let stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if stem.is_empty() || stem.chars().all(|c| c == '.') {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(stem)
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let stem = Self::file_stem(key)?;
        Ok(self.directory.join(format!("{}.{}", stem, FILE_EXTENSION)))
    }

    fn temp_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let stem = Self::file_stem(key)?;
        Ok(self
            .directory
            .join(format!("{}.{}.tmp", stem, FILE_EXTENSION)))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.directory).map_err(|e| {
            StoreError::io(format!(
                "Failed to create directory {}: {}",
                self.directory.display(),
                e
            ))
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.file_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let final_path = self.file_path(key)?;
        let temp_path = self.temp_path(key)?;
        self.ensure_dir()?;

        let mut file = fs::File::create(&temp_path).map_err(|e| {
            StoreError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(value.as_bytes()).map_err(|e| {
            StoreError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().map_err(|e| {
            StoreError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &final_path).map_err(|e| {
            StoreError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.file_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_store() -> (FileKeyValueStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("state"));
        (store, dir)
    }

    #[test]
    fn get_returns_none_before_any_write() {
        let (store, _dir) = create_store();
        assert_eq!(store.get("app.selection.v2").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_file() {
        let (store, _dir) = create_store();
        store.set("app.selection.v2", "{}").unwrap();

        let path = store.directory().join("app.selection.v2.json");
        assert!(path.exists());
        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
    }

    #[test]
    fn set_leaves_no_temp_file() {
        let (store, _dir) = create_store();
        store.set("k", "v").unwrap();

        let leftovers: Vec<_> = fs::read_dir(store.directory())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn set_overwrites_existing_value() {
        let (store, _dir) = create_store();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn remove_deletes_file_and_tolerates_missing() {
        let (store, _dir) = create_store();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn unsafe_characters_are_replaced() {
        assert_eq!(
            FileKeyValueStore::file_stem("../etc/passwd").unwrap(),
            ".._etc_passwd"
        );
        assert_eq!(FileKeyValueStore::file_stem("a b:c").unwrap(), "a_b_c");
    }

    #[test]
    fn dot_only_and_empty_keys_are_rejected() {
        assert!(matches!(
            FileKeyValueStore::file_stem(""),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            FileKeyValueStore::file_stem(".."),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn values_survive_a_new_store_instance() {
        let (store, _dir) = create_store();
        store.set("k", "persisted").unwrap();

        let reopened = FileKeyValueStore::new(store.directory());
        assert_eq!(reopened.get("k").unwrap(), Some("persisted".to_string()));
    }
}
