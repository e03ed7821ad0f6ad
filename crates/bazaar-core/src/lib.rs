//! # bazaar-core: Pure Storefront Logic for Bazaar
//!
//! Cart, catalog filtering, delivery pricing and checkout validation for the
//! Bazaar grocery storefront, as plain functions over plain data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bazaar Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │   Catalog ──► Product card ──► Cart drawer ──► Checkout page    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command calls                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bazaar-storefront                               │   │
//! │  │   config, seed catalog, session state, async order submission   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  money  │ │  cart   │ │ catalog │ │ pricing │ │ checkout │ │   │
//! │  │   │  Money  │ │  Cart   │ │ filter  │ │ fee     │ │ validate │ │   │
//! │  │   │         │ │  store  │ │ Catalog │ │ quote   │ │ flow     │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • NO GLOBAL STATE            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Order, etc.)
//! - [`money`] - Whole-tenge `Money` newtype
//! - [`cart`] - Cart lines and arithmetic
//! - [`store`] - Cart store with change observers
//! - [`catalog`] - Catalog container and product filter
//! - [`pricing`] - Delivery fee and minimum order rules
//! - [`checkout`] - Checkout form validation and state machine
//! - [`validation`] - Field-level validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{CartStore, DeliveryPolicy, FulfillmentType, Money, Product};
//!
//! let bread = Product::new("1", "Хлеб белый нарезной", Money::from_tenge(320), "bakery");
//!
//! let mut store = CartStore::new();
//! store.add_item(&bread);
//! store.add_item(&bread);
//!
//! let quote = DeliveryPolicy::default().quote(store.total(), FulfillmentType::Delivery);
//! assert_eq!(quote.subtotal.tenge(), 640);
//! assert_eq!(quote.grand_total.tenge(), 1140);
//! assert!(!quote.meets_minimum);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{filter, Catalog, CatalogQuery, PriceRange};
pub use checkout::{CheckoutFlow, CheckoutForm, CheckoutPhase};
pub use error::{CheckoutIssue, CheckoutRejection, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_delivery_fee, DeliveryPolicy, PriceQuote};
pub use store::{CartObserver, CartSnapshot, CartStore, NoOpObserver};
pub use types::*;
