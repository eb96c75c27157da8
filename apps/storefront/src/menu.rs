//! # Menu Loading
//!
//! The storefront ships a menu compiled into the binary. A deployment can
//! point `menu_path` at its own TOML file with the same shape.

use std::path::Path;

use tracing::info;

use lpi_core::Menu;

use crate::error::{AppError, AppResult};

/// Menu compiled into the binary.
const BUNDLED_MENU: &str = include_str!("../menu.toml");

/// Loads the menu from `path`, or the bundled one when `path` is `None`.
pub fn load_menu(path: Option<&Path>) -> AppResult<Menu> {
    let menu = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                AppError::config(format!("Failed to read menu {}: {e}", path.display()))
            })?;
            parse_menu(&raw)
                .map_err(|e| AppError::config(format!("{}: {}", path.display(), e.message)))?
        }
        None => parse_menu(BUNDLED_MENU)?,
    };

    info!(
        sections = menu.sections.len(),
        items = menu.len(),
        "Menu loaded"
    );
    Ok(menu)
}

/// Parses menu TOML text.
pub fn parse_menu(raw: &str) -> AppResult<Menu> {
    toml::from_str(raw).map_err(|e| AppError::config(format!("Invalid menu: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpi_core::{CartItemInput, Money};

    #[test]
    fn test_bundled_menu_parses() {
        let menu = load_menu(None).unwrap();
        assert!(!menu.is_empty());
        assert!(menu.sections.iter().all(|s| !s.items.is_empty()));

        let dosa = menu.find("Masala Dosa").unwrap();
        assert_eq!(Money::from_price_str(&dosa.price), Money::from_rupees(120));
        assert!(dosa.ingredients.is_some());
    }

    #[test]
    fn test_bundled_names_are_unique() {
        let menu = load_menu(None).unwrap();
        let mut names: Vec<_> = menu.items().map(|i| i.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), menu.len());
    }

    #[test]
    fn test_sparse_item_becomes_sparse_input() {
        let menu = parse_menu(
            r#"
            [[sections]]
            title = "Specials"

            [[sections.items]]
            name = "Thali"
            "#,
        )
        .unwrap();

        let input = CartItemInput::from(menu.find("Thali").unwrap());
        assert_eq!(input, CartItemInput::new("Thali"));
    }

    #[test]
    fn test_menu_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.toml");
        std::fs::write(
            &path,
            "[[sections]]\ntitle = \"Chaat\"\n[[sections.items]]\nname = \"Pani Puri\"\nprice = \"₹50\"\n",
        )
        .unwrap();

        let menu = load_menu(Some(&path)).unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.sections[0].title, "Chaat");
    }

    #[test]
    fn test_bad_menu_is_config_error() {
        assert_eq!(
            parse_menu("sections = 3").unwrap_err().code,
            crate::error::ErrorCode::ConfigError
        );

        let dir = tempfile::tempdir().unwrap();
        assert!(load_menu(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
