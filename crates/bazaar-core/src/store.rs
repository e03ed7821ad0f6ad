//! # Cart Store
//!
//! Owns the session's [`Cart`] and tells interested parties when it changes.
//!
//! ## Ownership
//! There is no global cart. Each browsing session constructs its own
//! `CartStore` and passes it (by `&mut`) to whatever needs to mutate it.
//! Tests build one per case.
//!
//! ## Change Notification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  store.add_item(&p) ──► Cart mutated? ──yes──► snapshot()               │
//! │                              │                    │                     │
//! │                              no                   ▼                     │
//! │                              │          for each observer:              │
//! │                              ▼            on_cart_changed(&snapshot)    │
//! │                          (silent)                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cart::{Cart, CartItem, CartTotals};
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of the cart handed to observers and API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

// =============================================================================
// Observer Trait
// =============================================================================

/// Receives a snapshot after every cart mutation that changed state.
///
/// Called synchronously inside the mutating call, so a store shared
/// behind a lock is still locked. Work from the snapshot only; reading or
/// mutating the cart from here deadlocks. Hand slow work (disk, network)
/// to a channel or task.
pub trait CartObserver: Send + Sync {
    fn on_cart_changed(&self, snapshot: &CartSnapshot);
}

/// Observer that ignores every notification.
pub struct NoOpObserver;

impl CartObserver for NoOpObserver {
    fn on_cart_changed(&self, _snapshot: &CartSnapshot) {}
}

// =============================================================================
// Cart Store
// =============================================================================

/// Single-owner cart state with observer notification.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    observers: Vec<Box<dyn CartObserver>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CartStore {
    /// Creates an empty store with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Observers are called in registration order.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) {
        self.observers.push(observer);
    }

    /// Adds one unit of `product`. Always succeeds.
    pub fn add_item(&mut self, product: &Product) {
        let quantity = self.cart.add_item(product);
        debug!(product_id = %product.id, quantity, "cart add_item");
        self.notify();
    }

    /// Adds `quantity` units of `product`; non-positive quantities are ignored.
    pub fn add_quantity(&mut self, product: &Product, quantity: i64) {
        if quantity <= 0 {
            return;
        }
        let total = self.cart.add_quantity(product, quantity);
        debug!(product_id = %product.id, added = quantity, quantity = total, "cart add_quantity");
        self.notify();
    }

    /// Adds a batch of lines (repeat order) with a single notification.
    pub fn add_items(&mut self, items: &[CartItem]) {
        if self.cart.add_items(items) {
            debug!(lines = items.len(), "cart add_items");
            self.notify();
        }
    }

    /// Sets an item's quantity; `<= 0` removes it, unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if self.cart.update_quantity(product_id, quantity) {
            debug!(product_id = %product_id, quantity, "cart update_quantity");
            self.notify();
        }
    }

    /// Removes an item if present.
    pub fn remove_item(&mut self, product_id: &str) {
        if self.cart.remove_item(product_id) {
            debug!(product_id = %product_id, "cart remove_item");
            self.notify();
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        if self.cart.clear() {
            debug!("cart cleared");
            self.notify();
        }
    }

    /// Read access to the underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(&self.cart)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Sum of `price × quantity`.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.cart.quantity_of(product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &self.observers {
            observer.on_cart_changed(&snapshot);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every snapshot it receives.
    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<CartSnapshot>>>);

    impl CartObserver for Recorder {
        fn on_cart_changed(&self, snapshot: &CartSnapshot) {
            self.0.lock().unwrap().push(snapshot.clone());
        }
    }

    impl Recorder {
        fn count(&self) -> usize {
            self.0.lock().unwrap().len()
        }

        fn last_total(&self) -> Option<Money> {
            self.0.lock().unwrap().last().map(|s| s.totals.total)
        }
    }

    fn bread() -> Product {
        Product::new("1", "Хлеб белый нарезной", Money::from_tenge(320), "bakery")
    }

    #[test]
    fn test_observers_see_each_change() {
        let recorder = Recorder::default();
        let mut store = CartStore::new();
        store.subscribe(Box::new(recorder.clone()));

        store.add_item(&bread());
        store.add_item(&bread());
        assert_eq!(recorder.count(), 2);
        assert_eq!(recorder.last_total(), Some(Money::from_tenge(640)));

        store.update_quantity("1", 5);
        assert_eq!(recorder.count(), 3);
        assert_eq!(recorder.last_total(), Some(Money::from_tenge(1600)));
    }

    #[test]
    fn test_noops_do_not_notify() {
        let recorder = Recorder::default();
        let mut store = CartStore::new();
        store.subscribe(Box::new(recorder.clone()));

        store.remove_item("missing");
        store.update_quantity("missing", 3);
        store.clear();
        store.add_quantity(&bread(), 0);
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_add_items_notifies_once() {
        let recorder = Recorder::default();
        let mut store = CartStore::new();
        store.subscribe(Box::new(recorder.clone()));

        let milk = Product::new("5", "Молоко 2.5%", Money::from_tenge(650), "dairy");
        store.add_items(&[
            CartItem::from_product(&bread(), 2),
            CartItem::from_product(&milk, 1),
        ]);

        assert_eq!(recorder.count(), 1);
        assert_eq!(store.item_count(), 3);
        assert_eq!(recorder.last_total(), Some(Money::from_tenge(1290)));
    }

    #[test]
    fn test_isolated_instances() {
        let mut a = CartStore::new();
        let b = CartStore::new();

        a.add_item(&bread());
        assert_eq!(a.item_count(), 1);
        assert_eq!(b.item_count(), 0);
    }

    #[test]
    fn test_clear_then_reads() {
        let mut store = CartStore::new();
        store.subscribe(Box::new(NoOpObserver));
        store.add_quantity(&bread(), 3);

        store.clear();
        assert_eq!(store.item_count(), 0);
        assert!(store.total().is_zero());
        assert!(store.snapshot().items.is_empty());
    }
}
