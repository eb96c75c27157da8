//! # App Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, AppError>                                                   │
//! │         │                                                               │
//! │         ├── Not on menu?      ── AppError::not_found ─────────┐        │
//! │         ├── Form not ready    ── AppError::validation ────────┤        │
//! │         ├── CartError         ── ErrorCode::CartError ────────┤        │
//! │         ├── OrderError        ── ErrorCode::OrderError ───────┤        │
//! │         ├── StoreError        ── ErrorCode::StorageError ─────┤        │
//! │         └── Bad config / menu ── ErrorCode::ConfigError ──────┤        │
//! │                                                               ▼        │
//! │  stderr:  error [NOT_FOUND]: Menu item not found: Pizza               │
//! │  --json:  {"code":"NOT_FOUND","message":"Menu item not found: Pizza"} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use lpi_core::{CartError, OrderError};
use lpi_store::StoreError;

/// Result type for storefront operations.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Menu item not found: Pizza"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Named dish or file does not exist
    NotFound,

    /// Checkout form is not ready to submit
    ValidationError,

    /// Local storage could not be read or written
    StorageError,

    /// Config file or menu file is unusable
    ConfigError,

    /// Cart rejected the input
    CartError,

    /// Order message or link could not be produced
    OrderError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// The serialized form, e.g. `NOT_FOUND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::OrderError => "ORDER_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        AppError::new(ErrorCode::CartError, err.to_string())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        AppError::new(ErrorCode::OrderError, err.to_string())
    }
}

/// Storage failures keep their detail in the log; the user gets the short
/// form.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Storage error");
        let message = match err {
            StoreError::NoDataDir => {
                "Could not find a data directory; pass --data-dir or set LPI_DATA_DIR".to_string()
            }
            StoreError::InvalidKey(key) => format!("Invalid storage key: {key}"),
            other => other.to_string(),
        };
        AppError::new(ErrorCode::StorageError, message)
    }
}
