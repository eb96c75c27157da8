//! # Validation Module
//!
//! Field rules for cart input and the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input fields                                                 │
//! │  └── digits_only(): phone / PIN boxes drop anything but 0-9            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── validate_customer_name / validate_phone / validate_address        │
//! │  └── validate_pin_code (format + delivery area)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: checkout::evaluate_submission                                │
//! │  └── Combines everything into one "can submit" answer                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lpi_core::validation::{validate_phone, validate_pin_code};
//!
//! assert!(validate_phone("9876543210").is_ok());
//! assert!(validate_pin_code("201301", &["201"]).is_ok());
//! assert!(validate_pin_code("400001", &["201"]).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MIN_CUSTOMER_NAME_LEN, PHONE_DIGITS, PIN_CODE_DIGITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cart Input
// =============================================================================

/// Validates the name a cart line is keyed by.
///
/// ## Rules
/// - Must not be empty. Whitespace is part of the name and is kept as is.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Validates the customer's name.
///
/// ## Rules
/// - At least 2 characters after trimming
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() < MIN_CUSTOMER_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_CUSTOMER_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Exactly 10 ASCII digits after trimming, no country code
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!("must be exactly {PHONE_DIGITS} digits"),
        });
    }

    Ok(())
}

/// Validates the delivery address.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_address(address: &str) -> ValidationResult<()> {
    if address.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }

    Ok(())
}

/// Validates a PIN code against the delivery area.
///
/// ## Rules
/// - Exactly 6 ASCII digits (surrounding spaces are ignored)
/// - Starts with one of `serviceable_prefixes`
///
/// ## User Workflow
/// ```text
/// PIN box: "201301"
///      │
///      ├── empty?            → Required
///      ├── not 6 digits?     → InvalidFormat
///      ├── prefix not listed → NotServiceable
///      └── OK                → order button can enable
/// ```
pub fn validate_pin_code<S: AsRef<str>>(
    pin_code: &str,
    serviceable_prefixes: &[S],
) -> ValidationResult<()> {
    let pin_code = pin_code.trim();

    if pin_code.is_empty() {
        return Err(ValidationError::Required {
            field: "PIN code".to_string(),
        });
    }

    if pin_code.len() != PIN_CODE_DIGITS || !pin_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "PIN code".to_string(),
            reason: format!("must be exactly {PIN_CODE_DIGITS} digits"),
        });
    }

    if !serviceable_prefixes
        .iter()
        .any(|prefix| pin_code.starts_with(prefix.as_ref()))
    {
        return Err(ValidationError::NotServiceable {
            pin_code: pin_code.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Input Sanitizing
// =============================================================================

/// Keeps only ASCII digits and truncates to `max_len`.
///
/// Mirrors the phone and PIN inputs, which drop any non-digit as it is typed
/// and cap the length.
///
/// ## Example
/// ```rust
/// use lpi_core::validation::digits_only;
///
/// assert_eq!(digits_only("+91 98765-43210", 10), "9198765432");
/// assert_eq!(digits_only("2013 01", 6), "201301");
/// ```
pub fn digits_only(input: &str, max_len: usize) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(max_len)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
