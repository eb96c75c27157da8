//! # lpi-core: Pure Business Logic for the LPI Kitchen Storefront
//!
//! Everything the storefront needs to reason about a cart lives here, as
//! pure functions and plain data. Storage, the CLI and any web front end sit
//! on top of this crate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (web UI / CLI)                     │   │
//! │  │      Menu ──► Cart ──► Checkout form ──► Messaging deep link    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                lpi-store (CartStore, LocalStorage)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lpi-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  money  │ │  cart   │ │ checkout │ │  order  │ │ valid. │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type in integer paise, price string parsing
//! - [`catalog`] - Menu items and the input accepted by the cart
//! - [`cart`] - Cart lines, mutations and derived totals
//! - [`checkout`] - Delivery policy and the submit gate
//! - [`order`] - Order summary text and messaging link
//! - [`validation`] - Checkout form field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use lpi_core::{Cart, CartItemInput, Money};
//! use lpi_core::checkout::DeliveryPolicy;
//!
//! let mut cart = Cart::new();
//! cart.add_item(&CartItemInput::new("Paneer Tikka").with_price("₹120")).unwrap();
//! cart.add_item(&CartItemInput::new("Paneer Tikka")).unwrap();
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.subtotal(), Money::from_rupees(240));
//!
//! let policy = DeliveryPolicy::default();
//! assert_eq!(policy.delivery_charge(cart.subtotal()), Money::zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod order;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartChange, CartLine, CartSnapshot, CartTotals};
pub use catalog::{CartItemInput, Menu, MenuItem, MenuSection};
pub use error::{CartError, OrderError, ValidationError};
pub use money::Money;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot lives under.
///
/// Kept identical to the key the browser storefront has always written, so a
/// snapshot saved by either side can be read by the other.
pub const CART_STORAGE_KEY: &str = "lpi_cart";

/// The only currency symbol prices are written with.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Price stored for a line when the catalog item had none.
pub const DEFAULT_PRICE: &str = "₹0";

/// Minimum trimmed length of the customer's name at checkout.
pub const MIN_CUSTOMER_NAME_LEN: usize = 2;

/// Number of digits in a phone number (without country code).
pub const PHONE_DIGITS: usize = 10;

/// Number of digits in an Indian PIN code.
pub const PIN_CODE_DIGITS: usize = 6;
