//! # Catalog Types
//!
//! The menu is read-only external data. The cart never owns it; it copies
//! four fields out of an item when the item is added.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Menu ──► MenuSection ("Starters") ──► MenuItem ("Paneer Tikka")       │
//! │                                             │                           │
//! │                                             │ CartItemInput::from       │
//! │                                             ▼                           │
//! │                              CartItemInput { name, price?,              │
//! │                                              description?, image? }     │
//! │                                             │                           │
//! │                                             │ Cart::add_item            │
//! │                                             ▼                           │
//! │                                          CartLine                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Menu
// =============================================================================

/// One dish on the menu.
///
/// `price` is a display string exactly as the menu shows it ("₹199").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,

    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub description: String,

    /// Image URL.
    #[serde(default)]
    pub image: String,

    /// Free-text ingredient list. Display only; never copied into the cart.
    #[serde(default)]
    pub ingredients: Option<String>,
}

/// A titled group of menu items ("Starters", "Main Course").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub title: String,

    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// The full catalog, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub sections: Vec<MenuSection>,
}

impl Menu {
    /// Looks up an item by exact name.
    pub fn find(&self, name: &str) -> Option<&MenuItem> {
        self.items().find(|item| item.name == name)
    }

    /// Looks up an item by name, ignoring ASCII case and surrounding spaces.
    ///
    /// Convenience for typed input; exact matches win.
    pub fn find_loose(&self, name: &str) -> Option<&MenuItem> {
        let wanted = name.trim();
        self.find(wanted).or_else(|| {
            self.items()
                .find(|item| item.name.eq_ignore_ascii_case(wanted))
        })
    }

    /// Iterates over every item across all sections.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    /// Number of items across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Checks if the menu has no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Cart Input
// =============================================================================

/// What `Cart::add_item` accepts.
///
/// Only `name` is required. Missing fields get fallbacks when a new line is
/// created (`price` → "₹0", the rest → empty).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub name: String,

    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

impl CartItemInput {
    /// Creates an input carrying only a name.
    pub fn new(name: impl Into<String>) -> Self {
        CartItemInput {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the price string.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Copies the four fields the cart knows about. Empty strings count as
/// missing, matching how the storefront treated falsy values.
impl From<&MenuItem> for CartItemInput {
    fn from(item: &MenuItem) -> Self {
        fn non_empty(s: &str) -> Option<String> {
            (!s.is_empty()).then(|| s.to_string())
        }

        CartItemInput {
            name: item.name.clone(),
            price: non_empty(&item.price),
            description: non_empty(&item.description),
            image: non_empty(&item.image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_menu() -> Menu {
        Menu {
            sections: vec![
                MenuSection {
                    title: "Starters".to_string(),
                    items: vec![MenuItem {
                        name: "Paneer Tikka".to_string(),
                        price: "₹180".to_string(),
                        description: "Char-grilled cottage cheese".to_string(),
                        image: "/img/paneer-tikka.jpg".to_string(),
                        ingredients: Some("Paneer, curd, spices".to_string()),
                    }],
                },
                MenuSection {
                    title: "Breads".to_string(),
                    items: vec![MenuItem {
                        name: "Butter Naan".to_string(),
                        price: String::new(),
                        description: String::new(),
                        image: String::new(),
                        ingredients: None,
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_menu_lookup() {
        let menu = sample_menu();
        assert_eq!(menu.len(), 2);
        assert!(menu.find("Paneer Tikka").is_some());
        assert!(menu.find("paneer tikka").is_none());
        assert_eq!(
            menu.find_loose("  paneer tikka ").map(|i| i.price.as_str()),
            Some("₹180")
        );
        assert!(menu.find_loose("Dal Makhani").is_none());
    }

    #[test]
    fn test_input_from_menu_item_drops_ingredients() {
        let menu = sample_menu();
        let input = CartItemInput::from(menu.find("Paneer Tikka").unwrap());
        assert_eq!(input.name, "Paneer Tikka");
        assert_eq!(input.price.as_deref(), Some("₹180"));
        assert_eq!(input.image.as_deref(), Some("/img/paneer-tikka.jpg"));
    }

    #[test]
    fn test_input_from_sparse_item_has_no_fields() {
        let menu = sample_menu();
        let input = CartItemInput::from(menu.find("Butter Naan").unwrap());
        assert_eq!(input, CartItemInput::new("Butter Naan"));
    }

    #[test]
    fn test_empty_menu() {
        assert!(Menu::default().is_empty());
    }
}
