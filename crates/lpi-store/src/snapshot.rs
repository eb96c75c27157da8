//! # Cart Snapshot Format
//!
//! The persisted cart is a bare JSON array of lines, the same shape the
//! browser storefront writes to `localStorage`:
//!
//! ```json
//! [
//!   { "name": "Paneer Tikka", "price": "₹180", "description": "...",
//!     "image": "/img/paneer-tikka.jpg", "quantity": 2 }
//! ]
//! ```
//!
//! ## Tolerant Decoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stored field          Missing / bad value     Becomes                  │
//! │  ────────────          ───────────────────     ───────                  │
//! │  price                 absent, null, ""        "₹0"                     │
//! │  description, image    absent, null            ""                       │
//! │  quantity              absent, null            1                        │
//! │  quantity              < 1                     line dropped             │
//! │  name                  absent, empty           line dropped             │
//! │  name                  repeated                merged, qty summed       │
//! │  anything else         extra fields            ignored                  │
//! │                                                                         │
//! │  Not a JSON array of objects → StoreError::Decode                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;

use lpi_core::{Cart, CartLine, DEFAULT_PRICE};

use crate::error::{StoreError, StoreResult};

/// A line as it may appear in storage, before defaults are applied.
#[derive(Debug, Deserialize)]
struct StoredLine {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    price: Option<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    image: Option<String>,

    #[serde(default)]
    quantity: Option<i64>,
}

impl From<StoredLine> for CartLine {
    fn from(stored: StoredLine) -> Self {
        let quantity = stored.quantity.unwrap_or(1).max(0);

        CartLine {
            name: stored.name.unwrap_or_default(),
            price: stored
                .price
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PRICE.to_string()),
            description: stored.description.unwrap_or_default(),
            image: stored.image.unwrap_or_default(),
            // Zero is dropped by Cart::from_lines.
            quantity: u32::try_from(quantity).unwrap_or(u32::MAX),
        }
    }
}

/// Serializes a cart to its stored form.
pub fn encode(cart: &Cart) -> StoreResult<String> {
    serde_json::to_string(cart).map_err(StoreError::Encode)
}

/// Reads a stored cart, filling defaults and repairing invariants.
pub fn decode(raw: &str) -> StoreResult<Cart> {
    let stored: Vec<StoredLine> =
        serde_json::from_str(raw).map_err(|e| StoreError::Decode(e.to_string()))?;

    Ok(Cart::from_lines(stored.into_iter().map(CartLine::from)))
}
