//! # Cart
//!
//! The cart line collection, its four mutations, and the totals derived
//! from it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                Cart Method               Outcome             │
//! │  ─────────                ───────────               ───────             │
//! │                                                                         │
//! │  "Add" on a dish ───────► add_item(input) ───────► Added | Incremented  │
//! │                                                                         │
//! │  "+" / "−" ─────────────► update_quantity(n, ±1) ► QuantityChanged      │
//! │                                                    | Unchanged          │
//! │                                                                         │
//! │  "Remove" ──────────────► remove_item(name) ─────► Removed | Unchanged  │
//! │                                                                         │
//! │  "Clear Cart" ──────────► clear() ───────────────► Cleared | Unchanged  │
//! │                                                                         │
//! │  Render ────────────────► total_items(), subtotal() (always fresh)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per `name`
//! - Every line has `quantity >= 1`
//! - Lines keep insertion order

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::catalog::CartItemInput;
use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::validation::validate_item_name;
use crate::DEFAULT_PRICE;

// =============================================================================
// Cart Line
// =============================================================================

/// One dish in the cart, with its quantity.
///
/// ## Price Freezing
/// `price`, `description` and `image` are captured when the line is created.
/// Adding the same dish again only bumps `quantity`; the stored fields are
/// not refreshed from the newer input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Unique key within the cart.
    pub name: String,

    /// Display price, e.g. "₹199".
    pub price: String,

    pub description: String,

    /// Image URL.
    pub image: String,

    /// Always at least 1 while the line exists.
    pub quantity: u32,
}

impl CartLine {
    /// Builds a fresh line (quantity 1) from input, applying fallbacks.
    fn from_input(input: &CartItemInput) -> Self {
        CartLine {
            name: input.name.clone(),
            price: input
                .price
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_PRICE.to_string()),
            description: input.description.clone().unwrap_or_default(),
            image: input.image.clone().unwrap_or_default(),
            quantity: 1,
        }
    }

    /// Numeric unit price. Unreadable prices are ₹0.
    pub fn unit_price(&self) -> Money {
        Money::from_price_str(&self.price)
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Change
// =============================================================================

/// What a cart operation did.
///
/// Callers use this to decide whether anything needs persisting or
/// re-rendering; [`CartChange::Unchanged`] means the cart is byte-for-byte
/// what it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum CartChange {
    /// A new line was appended with quantity 1.
    Added,

    /// An existing line's quantity went up by one.
    Incremented { quantity: u32 },

    /// A line's quantity was set to a new value.
    QuantityChanged { quantity: u32 },

    /// A line was deleted.
    Removed,

    /// Every line was dropped.
    Cleared { lines: usize },

    /// Nothing matched or nothing moved.
    Unchanged,
}

impl CartChange {
    /// Returns true if the cart contents changed.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, CartChange::Unchanged)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The ordered collection of cart lines.
///
/// Fields are private: every change goes through the methods below so the
/// invariants cannot be broken from outside. Serializes as a bare array of
/// lines; reading one back goes through [`Cart::from_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from previously stored lines, repairing anything that
    /// breaks the invariants.
    ///
    /// ## Repairs
    /// - Lines with an empty name or zero quantity are dropped
    /// - Repeated names are folded into the first occurrence, quantities summed
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();

        for line in lines {
            if line.name.is_empty() || line.quantity == 0 {
                warn!(name = %line.name, quantity = line.quantity, "Dropping invalid stored cart line");
                continue;
            }

            match cart.lines.iter_mut().find(|l| l.name == line.name) {
                Some(existing) => {
                    warn!(name = %line.name, "Merging duplicate stored cart line");
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }

        cart
    }

    /// Adds a dish, or bumps its quantity if it is already in the cart.
    ///
    /// ## Behavior
    /// - Name already present: quantity + 1, nothing else touched
    /// - Name not present: new line, quantity 1, fallbacks applied
    ///
    /// ## Returns
    /// - `Ok(Added)` / `Ok(Incremented { quantity })`
    /// - `Err(CartError::InvalidItem)` if the name is empty; the cart is
    ///   left untouched
    pub fn add_item(&mut self, input: &CartItemInput) -> CartResult<CartChange> {
        if let Err(err) = validate_item_name(&input.name) {
            warn!(error = %err, "Rejected cart item");
            return Err(CartError::InvalidItem {
                reason: err.to_string(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.name == input.name) {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(CartChange::Incremented {
                quantity: line.quantity,
            });
        }

        self.lines.push(CartLine::from_input(input));
        Ok(CartChange::Added)
    }

    /// Moves a line's quantity by `delta`, never below 1.
    ///
    /// ## Behavior
    /// - new quantity = max(1, current + delta)
    /// - Lines left at zero are filtered out afterwards
    /// - Unknown name: `Unchanged`
    pub fn update_quantity(&mut self, name: &str, delta: i64) -> CartChange {
        let Some(line) = self.lines.iter_mut().find(|l| l.name == name) else {
            return CartChange::Unchanged;
        };

        let target = i64::from(line.quantity).saturating_add(delta).max(1);
        let quantity = u32::try_from(target).unwrap_or(u32::MAX);
        let changed = quantity != line.quantity;
        line.quantity = quantity;

        self.lines.retain(|l| l.quantity > 0);

        if changed {
            CartChange::QuantityChanged { quantity }
        } else {
            CartChange::Unchanged
        }
    }

    /// Deletes a line whatever its quantity.
    pub fn remove_item(&mut self, name: &str) -> CartChange {
        let before = self.lines.len();
        self.lines.retain(|l| l.name != name);

        if self.lines.len() < before {
            CartChange::Removed
        } else {
            CartChange::Unchanged
        }
    }

    /// Drops every line.
    pub fn clear(&mut self) -> CartChange {
        let lines = self.lines.len();
        self.lines.clear();

        if lines > 0 {
            CartChange::Cleared { lines }
        } else {
            CartChange::Unchanged
        }
    }

    /// The lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by name.
    pub fn get(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.name == name)
    }

    /// Returns the number of distinct dishes.
    pub fn distinct_items(&self) -> usize {
        self.lines.len()
    }

    /// Returns the sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of unit price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Derived totals for display.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    /// Lines plus totals, as handed to observers.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self)
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub distinct_items: usize,
    pub total_items: u64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            distinct_items: cart.distinct_items(),
            total_items: cart.total_items(),
            subtotal: cart.subtotal(),
        }
    }
}

/// Lines and totals at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            lines: cart.lines.clone(),
            totals: CartTotals::from(cart),
        }
    }
}
