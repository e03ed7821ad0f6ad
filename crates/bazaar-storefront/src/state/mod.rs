//! # Session State
//!
//! State objects owned by a [`Storefront`](crate::Storefront) session.
//!
//! ## State Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌───────────────┐ ┌──────────────┐   │
//! │  │ CatalogState │ │  CartState   │ │ CheckoutState │ │  OrderState  │   │
//! │  │              │ │              │ │               │ │              │   │
//! │  │ • Arc<..>    │ │ • CartStore  │ │ • phase       │ │ • placed     │   │
//! │  │ • read only  │ │ • observers  │ │ • submitter   │ │   orders     │   │
//! │  └──────────────┘ └──────────────┘ └───────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  Each command takes only the state it needs.                           │
//! │  Lock order when two are held: checkout, then cart.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use checkout::CheckoutState;
pub use orders::{OrderFilter, OrderHistory, OrderState};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `mutex`, recovering the data if a previous holder panicked.
///
/// Every mutation behind these locks leaves the data consistent before it
/// can panic, so a poisoned guard is still safe to use.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
