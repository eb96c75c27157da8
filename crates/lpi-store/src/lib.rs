//! # lpi-store: Cart Store and Local Storage
//!
//! The live cart, and the key/value storage its snapshot survives in.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      LPI Kitchen Data Flow                              │
//! │                                                                         │
//! │  Storefront command (add "Paneer Tikka")                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   lpi-store (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │   snapshot    │    │   storage    │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ mutate Cart   │───►│ encode JSON   │───►│ LocalStorage │  │   │
//! │  │   │ notify        │    │ decode +      │◄───│ Memory/File  │  │   │
//! │  │   │ observers     │    │ migrate       │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/lpi-kitchen/lpi_cart.json                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`cart_store`] - The store: owner and only mutator of the cart
//! - [`snapshot`] - Persisted JSON format and its tolerant decoding
//! - [`storage`] - `LocalStorage` trait and its backends
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use lpi_core::CartItemInput;
//! use lpi_store::{CartStore, MemoryStorage};
//!
//! let mut store = CartStore::open(MemoryStorage::new());
//! store.add_item(&CartItemInput::new("Masala Dosa").with_price("₹120")).unwrap();
//! assert_eq!(store.total_items(), 1);
//!
//! // Reopen over the same storage: the cart comes back.
//! let storage = store.close();
//! let store = CartStore::open(storage);
//! assert_eq!(store.lines()[0].name, "Masala Dosa");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod error;
pub mod snapshot;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartStore, ListenerId};
pub use error::{StoreError, StoreResult};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
