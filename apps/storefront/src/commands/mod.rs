//! # Storefront Commands
//!
//! Each command takes the state it needs and returns a serializable
//! response. Printing is the CLI's job.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── menu.rs      ◄─── Catalog listing
//! ├── cart.rs      ◄─── Cart manipulation
//! └── checkout.rs  ◄─── Quote, submit gate, order message
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the menu
//! fn list_menu(menu: &Menu) -> MenuResponse
//!
//! // Needs the menu and the store
//! fn add_to_cart(store: &mut CartStore<S>, menu: &Menu, name: &str)
//!
//! // Needs the store and config
//! fn checkout(store: &CartStore<S>, config: &AppConfig, form: CheckoutForm)
//! ```

pub mod cart;
pub mod checkout;
pub mod menu;
