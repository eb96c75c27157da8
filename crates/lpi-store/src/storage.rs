//! # Local Storage Backends
//!
//! String key → string value storage, shaped like the browser's
//! `localStorage`. The cart store writes one JSON value under one key.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  trait LocalStorage                                                    │
//! │    get_item(key)  → Option<String>                                     │
//! │    set_item(key, value)                                                │
//! │    remove_item(key)                                                    │
//! │        │                                                                │
//! │        ├── MemoryStorage   HashMap, optional byte quota                │
//! │        │                   (tests, embedding in a host UI)             │
//! │        │                                                                │
//! │        └── FileStorage     <data dir>/<key>.json                       │
//! │                            write temp file → rename                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Trait
// =============================================================================

/// Durable key/value storage.
pub trait LocalStorage {
    /// Reads the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage.
///
/// With a quota set, a write that would push the total size of keys and
/// values past it fails with [`StoreError::QuotaExceeded`] and leaves the
/// previous value in place, the way a full browser `localStorage` behaves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Creates an empty, unlimited storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty storage limited to `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        MemoryStorage {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Bytes used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(quota) = self.quota {
            let replaced = self.items.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One `<key>.json` file per key under a data directory.
///
/// ## Write Path
/// ```text
/// set_item("lpi_cart", json)
///      │
///      ├── create data dir if missing
///      ├── write  lpi_cart.json.tmp
///      └── rename lpi_cart.json.tmp → lpi_cart.json
/// ```
/// A crash mid-write leaves either the old file or the new one, never a
/// truncated snapshot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` as the data directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Uses the platform data directory.
    ///
    /// - Linux: `~/.local/share/lpi-kitchen`
    /// - macOS: `~/Library/Application Support/in.lpi.lpi-kitchen`
    /// - Windows: `%APPDATA%\lpi\lpi-kitchen\data`
    pub fn default_location() -> StoreResult<Self> {
        Self::default_dir()
            .map(Self::new)
            .ok_or(StoreError::NoDataDir)
    }

    /// Platform data directory, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("in", "lpi", "lpi-kitchen")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a key is stored in.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(key, e))?;
        fs::write(&tmp, value).map_err(|e| StoreError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(key, e))?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote storage item");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
