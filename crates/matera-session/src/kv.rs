//! # Key-Value Store
//!
//! The storage abstraction under the session stores.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KeyValueStore Implementations                       │
//! │                                                                         │
//! │            ┌───────────────────┐                                        │
//! │            │   KeyValueStore   │   get / set / remove                   │
//! │            │      (trait)      │   string keys, string values           │
//! │            └─────────┬─────────┘                                        │
//! │                      │                                                  │
//! │          ┌───────────┴───────────┐                                      │
//! │          ▼                       ▼                                      │
//! │   ┌─────────────┐         ┌─────────────┐                               │
//! │   │  FileStore  │         │ MemoryStore │                               │
//! │   │             │         │             │                               │
//! │   │ one file    │         │ HashMap,    │                               │
//! │   │ per key,    │         │ ephemeral   │                               │
//! │   │ temp+rename │         │ (tests)     │                               │
//! │   └─────────────┘         └─────────────┘                               │
//! │                                                                         │
//! │  The cart and grant stores only see the trait, so tests run against    │
//! │  MemoryStore and production runs against FileStore.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! FileStore writes go through a temp file in the same directory followed
//! by a rename. A crash mid-write leaves either the old value or the new
//! value on disk, never a torn one.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Trait
// =============================================================================

/// Durable string key-value storage.
///
/// Values are opaque strings; the stores above this layer decide the
/// serialization format (JSON snapshots).
pub trait KeyValueStore: Send + Sync {
    /// Reads the value for `key`. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Writes the value for `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Removes the value for `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> SessionResult<()>;
}

// =============================================================================
// File Store
// =============================================================================

/// File-backed store: one file per key under a data directory.
///
/// ## Usage
/// ```rust,ignore
/// let store = FileStore::open(config.data_dir())?;
/// store.set("matera.cart.v1", &json)?;
/// ```
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> SessionResult<Self> {
        let dir = dir.into();

        fs::create_dir_all(&dir)
            .map_err(|e| SessionError::Unavailable(format!("{}: {}", dir.display(), e)))?;

        Ok(FileStore { dir })
    }

    /// Maps a key to its backing file.
    ///
    /// Keys are fixed constants and already filesystem-safe; unexpected
    /// characters are replaced rather than trusted.
    fn file_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        self.dir.join(format!("{safe}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        match fs::read_to_string(self.file_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::read_failed(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        let path = self.file_path(key);
        let tmp = path.with_extension("json.tmp");

        // Same-directory rename keeps the swap atomic on the filesystem.
        // One writer per key (the owning store serializes its mutations).
        fs::write(&tmp, value).map_err(|e| SessionError::write_failed(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| SessionError::write_failed(key, e))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        match fs::remove_file(self.file_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::write_failed(key, e)),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let values = self.values.lock().expect("Store mutex poisoned");
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut values = self.values.lock().expect("Store mutex poisoned");
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut values = self.values.lock().expect("Store mutex poisoned");
        values.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn dir_entries(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn file_store_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("matera.cart.v1").unwrap(), None);

        store.set("matera.cart.v1", r#"{"lines":[]}"#).unwrap();
        assert_eq!(
            store.get("matera.cart.v1").unwrap().as_deref(),
            Some(r#"{"lines":[]}"#)
        );

        // Overwrite replaces the previous value
        store.set("matera.cart.v1", r#"{"lines":[1]}"#).unwrap();
        assert_eq!(
            store.get("matera.cart.v1").unwrap().as_deref(),
            Some(r#"{"lines":[1]}"#)
        );
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("matera.cart.v1", "persisted").unwrap();
        }

        // A fresh store over the same directory sees the value
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("matera.cart.v1").unwrap().as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("matera.wheel-grant.v1", "x").unwrap();
        store.remove("matera.wheel-grant.v1").unwrap();
        assert_eq!(store.get("matera.wheel-grant.v1").unwrap(), None);

        // Removing again is a no-op, not an error
        store.remove("matera.wheel-grant.v1").unwrap();
    }

    #[test]
    fn file_store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("matera.cart.v1", "value").unwrap();

        let entries = dir_entries(dir.path());
        assert_eq!(entries, vec!["matera.cart.v1.json".to_string()]);
    }

    #[test]
    fn file_store_sanitizes_unexpected_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("weird/key name", "value").unwrap();
        assert_eq!(store.get("weird/key name").unwrap().as_deref(), Some("value"));

        let entries = dir_entries(dir.path());
        assert_eq!(entries, vec!["weird_key_name.json".to_string()]);
    }

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryStore::new();

        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }
}
