//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the key and categorization            │
//! │       │                                                                 │
//! │       ├──► CartStore: logged, cart stays usable                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (storefront) ← Only for storage opened by the app itself     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Local storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem read or write failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    /// - Rename of the temp file failed
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Cart could not be turned into JSON.
    #[error("Failed to encode cart snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// Stored value is not a readable cart snapshot.
    #[error("Failed to decode cart snapshot: {0}")]
    Decode(String),

    /// Write would take the backend over its size limit.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Key contains characters the backend cannot store.
    #[error("Invalid storage key '{0}': only letters, digits, '_' and '-' are allowed")]
    InvalidKey(String),

    /// No platform data directory could be determined.
    #[error("Could not determine a data directory for this platform")]
    NoDataDir,
}

impl StoreError {
    /// Wraps an I/O error with the key it happened on.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }
}
