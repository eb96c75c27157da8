//! # Error Types
//!
//! Domain-specific error types for lpi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lpi-core errors (this file)                                           │
//! │  ├── CartError        - Rejected cart input                            │
//! │  ├── ValidationError  - Checkout form field failures                   │
//! │  └── OrderError       - Order message / link could not be built        │
//! │                                                                         │
//! │  lpi-store errors (separate crate)                                     │
//! │  └── StoreError       - Local storage read/write failures              │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── AppError         - What the user sees (code + message)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. Cart errors are reported back to the caller and
//! logged, and the cart is left exactly as it was.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart input that was refused without touching the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The item handed to `add_item` cannot become a cart line.
    ///
    /// ## When This Occurs
    /// - The item name is empty or only whitespace
    #[error("Invalid cart item: {reason}")]
    InvalidItem { reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout form validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Invalid format (e.g., phone number with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// PIN code is well formed but outside the delivery area.
    #[error("We do not deliver to PIN code {pin_code} yet")]
    NotServiceable { pin_code: String },
}

// =============================================================================
// Order Error
// =============================================================================

/// Errors while turning a cart into an outbound order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The submit gate is closed.
    #[error("Order cannot be submitted: {reason}")]
    NotReady { reason: String },

    /// The messaging link could not be formed from the configured number.
    #[error("Invalid order link: {0}")]
    InvalidLink(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for cart operation results.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_message() {
        let err = CartError::InvalidItem {
            reason: "name is required".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid cart item: name is required");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "address".to_string(),
        };
        assert_eq!(err.to_string(), "address is required");

        let err = ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "name must be at least 2 characters");

        let err = ValidationError::NotServiceable {
            pin_code: "400001".to_string(),
        };
        assert_eq!(err.to_string(), "We do not deliver to PIN code 400001 yet");
    }

    #[test]
    fn test_order_error_message() {
        let err = OrderError::NotReady {
            reason: "Your cart is empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Order cannot be submitted: Your cart is empty"
        );
    }
}
