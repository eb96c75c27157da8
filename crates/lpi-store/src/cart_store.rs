//! # Cart Store
//!
//! Sole owner and mutator of the cart. Every committed change is written to
//! local storage and then announced to observers.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Caller                 CartStore                Side effects           │
//! │  ──────                 ─────────                ────────────           │
//! │                                                                         │
//! │  open(storage) ───────► load + decode ──────────► (corrupt → empty)    │
//! │                                                                         │
//! │  add_item() ──────────► Cart::add_item ─┐                              │
//! │  update_quantity() ───► Cart::update_…  ├──► changed? ──► persist      │
//! │  remove_item() ───────► Cart::remove_…  │       │            │          │
//! │  clear_cart() ────────► Cart::clear ────┘       │            ▼          │
//! │                                                 │        observers      │
//! │                                                 │                       │
//! │                                                 └── Unchanged: nothing  │
//! │                                                                         │
//! │  close() ─────────────► drop observers ─────────► storage handed back  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! Storage problems never reach the caller. A bad snapshot on open gives an
//! empty cart; a failed write is logged and the in-memory cart keeps the
//! change.

use std::fmt;

use tracing::{debug, error, info, warn};

use lpi_core::error::CartResult;
use lpi_core::{Cart, CartChange, CartItemInput, CartLine, CartSnapshot, Money, CART_STORAGE_KEY};

use crate::snapshot;
use crate::storage::LocalStorage;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CartSnapshot)>;

/// The live cart plus the storage it persists to.
pub struct CartStore<S: LocalStorage> {
    cart: Cart,
    storage: S,
    key: String,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<S: LocalStorage> CartStore<S> {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens the store under the default `lpi_cart` key.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Opens the store, loading whatever snapshot `key` holds.
    ///
    /// ## Behavior
    /// - Nothing stored: empty cart
    /// - Storage unreadable or snapshot corrupt: empty cart, logged at `warn`
    /// - Legacy snapshot: defaults filled in, see [`crate::snapshot`]
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load(&storage, &key);

        info!(
            key = %key,
            lines = cart.distinct_items(),
            items = cart.total_items(),
            "Cart store opened"
        );

        CartStore {
            cart,
            storage,
            key,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Drops every observer and hands the storage back.
    pub fn close(self) -> S {
        debug!(key = %self.key, listeners = self.listeners.len(), "Cart store closed");
        self.storage
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a dish or bumps its quantity.
    ///
    /// An empty name is rejected: nothing is written and no observer runs.
    pub fn add_item(&mut self, input: &CartItemInput) -> CartResult<CartChange> {
        let change = self.cart.add_item(input)?;
        debug!(name = %input.name, ?change, "add_item");
        Ok(self.commit(change))
    }

    /// Moves a line's quantity by `delta`, never below 1.
    pub fn update_quantity(&mut self, name: &str, delta: i64) -> CartChange {
        let change = self.cart.update_quantity(name, delta);
        debug!(name, delta, ?change, "update_quantity");
        self.commit(change)
    }

    /// Deletes a line whatever its quantity.
    pub fn remove_item(&mut self, name: &str) -> CartChange {
        let change = self.cart.remove_item(name);
        debug!(name, ?change, "remove_item");
        self.commit(change)
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) -> CartChange {
        let change = self.cart.clear();
        debug!(?change, "clear_cart");
        self.commit(change)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    /// Lines plus totals, for rendering.
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use lpi_core::checkout::DeliveryPolicy;
    /// use lpi_store::{CartStore, MemoryStorage};
    ///
    /// let store = CartStore::open(MemoryStorage::new());
    /// let quote = store.with_cart(|cart| DeliveryPolicy::default().quote(cart));
    /// assert!(quote.subtotal.is_zero());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.cart)
    }

    /// Storage key the snapshot is written under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Registers a callback run after every committed change.
    ///
    /// Callbacks run synchronously, in registration order, after the
    /// snapshot has been written. No-op operations do not call them.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CartSnapshot) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn commit(&mut self, change: CartChange) -> CartChange {
        if change.is_mutation() {
            self.persist();
            self.notify();
        }
        change
    }

    fn persist(&mut self) {
        let result = snapshot::encode(&self.cart)
            .and_then(|json| self.storage.set_item(&self.key, &json));

        if let Err(e) = result {
            error!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }

        let snapshot = self.cart.snapshot();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl<S: LocalStorage + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Reads the snapshot under `key`, falling back to an empty cart.
fn load<S: LocalStorage>(storage: &S, key: &str) -> Cart {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored cart");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Cart storage unreadable, starting empty");
            return Cart::new();
        }
    };

    snapshot::decode(&raw).unwrap_or_else(|e| {
        warn!(key, error = %e, "Stored cart is corrupt, starting empty");
        Cart::new()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::storage::{FileStorage, MemoryStorage};

    fn item(name: &str, price: &str) -> CartItemInput {
        CartItemInput::new(name).with_price(price)
    }

    /// Storage whose reads or writes always fail.
    #[derive(Debug, Default)]
    struct BrokenStorage {
        fail_reads: bool,
    }

    impl LocalStorage for BrokenStorage {
        fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
            if self.fail_reads {
                Err(StoreError::io(
                    key,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                ))
            } else {
                Ok(None)
            }
        }

        fn set_item(&mut self, _key: &str, value: &str) -> StoreResult<()> {
            Err(StoreError::QuotaExceeded {
                needed: value.len(),
                quota: 0,
            })
        }

        fn remove_item(&mut self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_mutations_persist_snapshot() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(&item("Samosa", "₹30")).unwrap();
        store.add_item(&item("Samosa", "₹30")).unwrap();

        let raw = store.storage().get_item("lpi_cart").unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"name":"Samosa","price":"₹30","description":"","image":"","quantity":2}]"#
        );

        store.clear_cart();
        let raw = store.storage().get_item("lpi_cart").unwrap().unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_round_trip_into_fresh_store() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(&item("Paneer Tikka", "₹180")).unwrap();
        store.add_item(&item("Butter Naan", "₹40")).unwrap();
        store.update_quantity("Butter Naan", 3);
        let before = store.snapshot();

        let reopened = CartStore::open(store.close());
        assert_eq!(reopened.snapshot(), before);
        assert_eq!(reopened.total_items(), 5);
        assert_eq!(reopened.subtotal(), Money::from_rupees(340));
    }

    #[test]
    fn test_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = CartStore::open(FileStorage::new(dir.path()));
        store.add_item(&item("Chole Bhature", "₹150")).unwrap();
        drop(store);

        let store = CartStore::open(FileStorage::new(dir.path()));
        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.lines()[0].name, "Chole Bhature");
    }

    #[test]
    fn test_custom_key() {
        let mut store = CartStore::open_with_key(MemoryStorage::new(), "table_7");
        store.add_item(&item("Kheer", "₹90")).unwrap();

        assert_eq!(store.key(), "table_7");
        let storage = store.close();
        assert!(storage.get_item("lpi_cart").unwrap().is_none());
        assert!(storage.get_item("table_7").unwrap().is_some());
    }

    #[test]
    fn test_corrupt_snapshot_opens_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item("lpi_cart", "{not json").unwrap();

        let mut store = CartStore::open(storage);
        assert!(store.lines().is_empty());

        // The store keeps working and overwrites the bad value.
        store.add_item(&item("Jalebi", "₹50")).unwrap();
        let storage = store.close();
        assert!(storage
            .get_item("lpi_cart")
            .unwrap()
            .unwrap()
            .starts_with(r#"[{"name":"Jalebi""#));
    }

    #[test]
    fn test_unreadable_storage_opens_empty() {
        let store = CartStore::open(BrokenStorage { fail_reads: true });
        assert_eq!(store.total_items(), 0);
    }

    #[test]
    fn test_legacy_snapshot_is_migrated() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("lpi_cart", r#"[{"name":"Rasmalai","quantity":2},{"name":"Rasmalai"}]"#)
            .unwrap();

        let store = CartStore::open(storage);
        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.lines()[0].price, "₹0");
        assert_eq!(store.total_items(), 3);
    }

    #[test]
    fn test_write_failure_keeps_state() {
        let mut store = CartStore::open(BrokenStorage::default());
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        assert_eq!(
            store.add_item(&item("Pav Bhaji", "₹110")).unwrap(),
            CartChange::Added
        );
        assert_eq!(store.total_items(), 1);
        assert_eq!(store.subtotal(), Money::from_rupees(110));
        // Observers still hear about the change.
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn test_quota_failure_keeps_previous_snapshot() {
        let mut store = CartStore::open(MemoryStorage::with_quota(120));
        store.add_item(&item("Dosa", "₹100")).unwrap();
        let saved = store.storage().get_item("lpi_cart").unwrap();

        store
            .add_item(&item("A dish with a very long name", "₹1"))
            .unwrap();
        assert_eq!(store.lines().len(), 2);
        assert_eq!(store.storage().get_item("lpi_cart").unwrap(), saved);
    }

    #[test]
    fn test_observers_run_in_order_with_fresh_snapshot() {
        let mut store = CartStore::open(MemoryStorage::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        store.subscribe(move |snap| first.borrow_mut().push(("first", snap.totals.total_items)));
        let second = Rc::clone(&log);
        store.subscribe(move |snap| second.borrow_mut().push(("second", snap.totals.total_items)));

        store.add_item(&item("Vada Pav", "₹25")).unwrap();
        store.update_quantity("Vada Pav", 2);

        assert_eq!(
            *log.borrow(),
            vec![("first", 1), ("second", 1), ("first", 3), ("second", 3)]
        );
    }

    #[test]
    fn test_noops_do_not_notify_or_persist() {
        let mut store = CartStore::open(MemoryStorage::new());
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        assert_eq!(store.update_quantity("Missing", 1), CartChange::Unchanged);
        assert_eq!(store.remove_item("Missing"), CartChange::Unchanged);
        assert_eq!(store.clear_cart(), CartChange::Unchanged);
        assert!(store.add_item(&CartItemInput::new("")).is_err());

        assert_eq!(*calls.borrow(), 0);
        assert!(store.storage().is_empty());

        store.add_item(&item("Upma", "₹70")).unwrap();
        // Already at 1: decrementing changes nothing.
        assert_eq!(store.update_quantity("Upma", -1), CartChange::Unchanged);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = CartStore::open(MemoryStorage::new());
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.add_item(&item("Poha", "₹60")).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_item(&item("Poha", "₹60")).unwrap();

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item(&item("Biryani", "₹220")).unwrap();
        store.add_item(&item("Raita", "₹40")).unwrap();
        store.update_quantity("Biryani", 4);

        assert_eq!(store.remove_item("Biryani"), CartChange::Removed);
        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.lines()[0].name, "Raita");

        assert_eq!(store.clear_cart(), CartChange::Cleared { lines: 1 });
        assert_eq!(store.total_items(), 0);
        assert_eq!(store.subtotal(), Money::zero());
    }
}
