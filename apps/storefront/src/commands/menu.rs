//! # Menu Commands

use serde::Serialize;
use tracing::debug;

use lpi_core::{Menu, Money};

/// One dish as listed to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub name: String,
    pub price: String,
    pub description: String,

    /// Parsed price, `None` for prices like "Market Price".
    pub unit_price: Option<Money>,
}

/// A titled group of dishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSectionResponse {
    pub title: String,
    pub items: Vec<MenuEntry>,
}

/// The whole menu, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub sections: Vec<MenuSectionResponse>,
}

/// Lists the menu by section.
pub fn list_menu(menu: &Menu) -> MenuResponse {
    debug!(items = menu.len(), "list_menu command");

    MenuResponse {
        sections: menu
            .sections
            .iter()
            .map(|section| MenuSectionResponse {
                title: section.title.clone(),
                items: section
                    .items
                    .iter()
                    .map(|item| MenuEntry {
                        name: item.name.clone(),
                        price: item.price.clone(),
                        description: item.description.clone(),
                        unit_price: Money::parse_price(&item.price),
                    })
                    .collect(),
            })
            .collect(),
    }
}
