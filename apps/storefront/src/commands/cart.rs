//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ WhatsApp │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       checkout                           │
//! │                   update_cart_item  (checkout.rs)                      │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart survives between runs: every change is written through the
//! Cart Store before the command returns.

use serde::Serialize;
use tracing::debug;

use lpi_core::{CartChange, CartItemInput, CartLine, CartSnapshot, CartTotals, Menu};
use lpi_store::{CartStore, LocalStorage};

use crate::error::{AppError, AppResult};

/// Cart contents after a command, plus what the command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// `None` for read-only commands.
    pub change: Option<CartChange>,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn new(change: Option<CartChange>, snapshot: CartSnapshot) -> Self {
        CartResponse {
            change,
            lines: snapshot.lines,
            totals: snapshot.totals,
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart<S: LocalStorage>(store: &CartStore<S>) -> CartResponse {
    debug!("get_cart command");
    CartResponse::new(None, store.snapshot())
}

/// Adds a dish from the menu.
///
/// ## Behavior
/// - Name matched exactly first, then ignoring case and surrounding spaces
/// - Already in cart: quantity + 1
/// - Not on the menu: `NOT_FOUND`, cart untouched
///
/// ## User Workflow
/// ```text
/// $ lpi-storefront add "paneer tikka"
///      │
///      ├── menu.find_loose("paneer tikka") → "Paneer Tikka", "₹180"
///      ├── store.add_item(...)              → Added
///      └── lpi_cart.json rewritten
/// ```
pub fn add_to_cart<S: LocalStorage>(
    store: &mut CartStore<S>,
    menu: &Menu,
    name: &str,
) -> AppResult<CartResponse> {
    debug!(name, "add_to_cart command");

    let item = menu
        .find_loose(name)
        .ok_or_else(|| AppError::not_found("Menu item", name.trim()))?;

    let change = store.add_item(&CartItemInput::from(item))?;
    Ok(CartResponse::new(Some(change), store.snapshot()))
}

/// Moves a line's quantity by `delta`. Quantity never drops below 1; use
/// [`remove_from_cart`] to delete.
pub fn update_cart_item<S: LocalStorage>(
    store: &mut CartStore<S>,
    name: &str,
    delta: i64,
) -> CartResponse {
    debug!(name, delta, "update_cart_item command");
    let name = resolve_line_name(store, name);
    let change = store.update_quantity(&name, delta);
    CartResponse::new(Some(change), store.snapshot())
}

/// Removes a line whatever its quantity.
pub fn remove_from_cart<S: LocalStorage>(store: &mut CartStore<S>, name: &str) -> CartResponse {
    debug!(name, "remove_from_cart command");
    let name = resolve_line_name(store, name);
    let change = store.remove_item(&name);
    CartResponse::new(Some(change), store.snapshot())
}

/// Empties the cart.
pub fn clear_cart<S: LocalStorage>(store: &mut CartStore<S>) -> CartResponse {
    debug!("clear_cart command");
    let change = store.clear_cart();
    CartResponse::new(Some(change), store.snapshot())
}

/// Maps typed input onto a line name, ignoring case and surrounding spaces.
/// Unknown names pass through so the store reports `Unchanged`.
fn resolve_line_name<S: LocalStorage>(store: &CartStore<S>, name: &str) -> String {
    let wanted = name.trim();
    store
        .lines()
        .iter()
        .find(|line| line.name == wanted)
        .or_else(|| {
            store
                .lines()
                .iter()
                .find(|line| line.name.eq_ignore_ascii_case(wanted))
        })
        .map_or_else(|| name.to_string(), |line| line.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::menu::parse_menu;
    use lpi_core::Money;
    use lpi_store::MemoryStorage;

    fn menu() -> Menu {
        parse_menu(
            r#"
            [[sections]]
            title = "Mains"
            [[sections.items]]
            name = "Dal Makhani"
            price = "₹199"
            [[sections.items]]
            name = "Butter Naan"
            price = "₹40"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_add_from_menu() {
        let menu = menu();
        let mut store = CartStore::open(MemoryStorage::new());

        let response = add_to_cart(&mut store, &menu, " butter naan ").unwrap();
        assert_eq!(response.change, Some(CartChange::Added));
        assert_eq!(response.lines[0].name, "Butter Naan");
        assert_eq!(response.lines[0].price, "₹40");

        let response = add_to_cart(&mut store, &menu, "Butter Naan").unwrap();
        assert_eq!(response.change, Some(CartChange::Incremented { quantity: 2 }));
        assert_eq!(response.totals.subtotal, Money::from_rupees(80));
    }

    #[test]
    fn test_add_unknown_dish() {
        let mut store = CartStore::open(MemoryStorage::new());
        let err = add_to_cart(&mut store, &menu(), "Pizza").unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(store.lines().is_empty());
    }

    #[test]
    fn test_update_remove_clear() {
        let menu = menu();
        let mut store = CartStore::open(MemoryStorage::new());
        add_to_cart(&mut store, &menu, "Dal Makhani").unwrap();
        add_to_cart(&mut store, &menu, "Butter Naan").unwrap();

        let response = update_cart_item(&mut store, "dal makhani", 2);
        assert_eq!(response.change, Some(CartChange::QuantityChanged { quantity: 3 }));

        let response = update_cart_item(&mut store, "Dal Makhani", -10);
        assert_eq!(response.change, Some(CartChange::QuantityChanged { quantity: 1 }));

        let response = update_cart_item(&mut store, "Biryani", 1);
        assert_eq!(response.change, Some(CartChange::Unchanged));

        let response = remove_from_cart(&mut store, "BUTTER NAAN");
        assert_eq!(response.change, Some(CartChange::Removed));
        assert_eq!(response.totals.distinct_items, 1);

        let response = clear_cart(&mut store);
        assert_eq!(response.change, Some(CartChange::Cleared { lines: 1 }));
        assert_eq!(response.totals.total_items, 0);

        assert_eq!(get_cart(&store).change, None);
    }
}
