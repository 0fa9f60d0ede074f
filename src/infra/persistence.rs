//! Key-value persistence with failure-tolerant load and save.
//!
//! Backends implement [`KeyValueStore`] and report typed [`StorageError`]s.
//! [`PersistenceAdapter`] sits in front of a backend and absorbs every
//! failure: reads degrade to "nothing stored" and writes are logged and
//! dropped, so callers always keep a usable in-memory state.

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Key holding the notes document.
pub const NOTES_KEY: &str = "notes";

/// Key holding the categories document.
pub const CATEGORIES_KEY: &str = "categories";

/// Errors raised by persistence backends.
///
/// These never leave the persistence layer; [`PersistenceAdapter`] logs and
/// swallows them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid UTF-8 in {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("invalid storage key '{key}'")]
    InvalidKey { key: String },

    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// A synchronous string store addressed by key.
///
/// Methods take `&self`; single-threaded backends use interior mutability.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ===========================================
// FileStore
// ===========================================

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
///
/// Writes go through a temporary file and an atomic rename, so a crash
/// mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path used for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io { path, source: e }),
        };

        let content =
            String::from_utf8(bytes).map_err(|_| StorageError::InvalidEncoding { path })?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::Io {
            path: path.clone(),
            source: e,
        })?;

        temp.write_all(value.as_bytes())
            .map_err(|e| StorageError::Io {
                path: path.clone(),
                source: e,
            })?;

        temp.persist(&path).map_err(|e| StorageError::AtomicWrite {
            path: path.clone(),
            source: e.error,
        })?;

        Ok(())
    }
}

// ===========================================
// MemoryStore
// ===========================================

/// In-process store, used for tests and ephemeral sessions.
///
/// `fail_writes` / `fail_reads` simulate a broken or full backing store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key` with a raw value, bypassing the failure flags.
    pub fn insert(&self, key: &str, value: impl Into<String>) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.into());
    }

    /// Returns the raw value stored under `key`, bypassing the failure flags.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Makes every subsequent read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Makes every subsequent write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Unavailable {
                reason: "reads disabled".to_string(),
            });
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable {
                reason: "quota exceeded".to_string(),
            });
        }
        self.insert(key, value);
        Ok(())
    }
}

// ===========================================
// PersistenceAdapter
// ===========================================

/// Failure-tolerant front for a [`KeyValueStore`].
///
/// Cloning shares the same backend. Nothing here caches: every `get` reads
/// the backend and every `set` writes through immediately.
#[derive(Clone)]
pub struct PersistenceAdapter {
    backend: Rc<dyn KeyValueStore>,
}

impl PersistenceAdapter {
    /// Wraps a backend.
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Adapter over a [`FileStore`] rooted at `dir`.
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self::new(Rc::new(FileStore::new(dir)))
    }

    /// Adapter over a fresh, empty [`MemoryStore`].
    pub fn memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    /// Reads `key`; any backend failure is logged and reported as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => {
                debug!("event=storage_read key={} found={}", key, value.is_some());
                value
            }
            Err(err) => {
                warn!("event=storage_read key={} status=error error={}", key, err);
                None
            }
        }
    }

    /// Writes `key`; any backend failure is logged and dropped.
    pub fn set(&self, key: &str, value: &str) {
        match self.backend.set(key, value) {
            Ok(()) => debug!("event=storage_write key={} bytes={}", key, value.len()),
            Err(err) => warn!("event=storage_write key={} status=error error={}", key, err),
        }
    }

    /// Reads and parses a JSON document. Missing, unreadable, or malformed
    /// documents all yield `None`.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("event=storage_parse key={} status=error error={}", key, err);
                None
            }
        }
    }

    /// Serializes `value` as JSON and writes it under `key`.
    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, &raw),
            Err(err) => warn!("event=storage_serialize key={} status=error error={}", key, err),
        }
    }
}
