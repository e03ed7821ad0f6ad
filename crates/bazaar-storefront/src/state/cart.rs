//! # Cart State
//!
//! The session's cart store behind a mutex.
//!
//! ## Thread Safety
//! Commands may run concurrently (the checkout submission awaits while the
//! shopper keeps browsing), so the store sits behind `Mutex`. Cart
//! operations are short and nearly all of them write, so a `RwLock` buys
//! nothing.

use std::sync::Mutex;

use bazaar_core::{CartObserver, CartStore};

use super::lock;

#[derive(Debug, Default)]
pub struct CartState {
    store: Mutex<CartStore>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|store| store.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let store = lock(&self.store);
        f(&store)
    }

    /// Executes a function with write access to the cart store.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut store = lock(&self.store);
        f(&mut store)
    }

    /// Registers a change observer (badge counter, persistence, ...).
    ///
    /// Observers run while this state's lock is held and must not call
    /// back into it; see [`CartObserver`].
    pub fn subscribe(&self, observer: Box<dyn CartObserver>) {
        self.with_cart_mut(|store| store.subscribe(observer));
    }
}
