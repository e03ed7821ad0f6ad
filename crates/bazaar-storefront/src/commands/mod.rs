//! # Storefront Commands
//!
//! Every operation the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Browsing, product page, promotions
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Order summary, order placement
//! ├── orders.rs    ◄─── Order history, repeat order
//! └── config.rs    ◄─── Store details
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn browse_catalog(catalog: &CatalogState, query: CatalogQuery)
//!
//! // Needs catalog and cart
//! fn add_to_cart(config: &StorefrontConfig, catalog: &CatalogState, cart: &CartState, ...)
//!
//! // The only async command
//! async fn place_order(config, cart, checkout, orders, form)
//! ```
//!
//! Commands return serializable responses or an [`ApiError`](crate::ApiError).

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;

pub use cart::CartResponse;
pub use catalog::{CatalogResponse, PromotionsResponse};
pub use checkout::{CheckoutSummary, OrderConfirmation, PaymentOption};
pub use config::StoreInfo;
pub use orders::ReorderResponse;
