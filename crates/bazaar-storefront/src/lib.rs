//! # Bazaar Storefront
//!
//! The shopper's session: configuration, catalog, cart, checkout and order
//! history wired together behind command-style operations.
//!
//! ## Module Organization
//! ```text
//! bazaar_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront session, tracing)
//! ├── config.rs       ◄─── storefront.toml + BAZAAR_* overrides
//! ├── error.rs        ◄─── StorefrontError, serializable ApiError
//! ├── seed.rs         ◄─── Demo catalog, JSON catalog loading
//! ├── submit.rs       ◄─── OrderSubmitter (the async seam)
//! ├── state/
//! │   ├── cart.rs     ◄─── CartStore behind a Mutex
//! │   ├── catalog.rs  ◄─── Read-only catalog
//! │   ├── checkout.rs ◄─── Checkout phase + submitter
//! │   └── orders.rs   ◄─── Order history
//! └── commands/
//!     ├── catalog.rs  ◄─── browse, product page, promotions
//!     ├── cart.rs     ◄─── cart manipulation
//!     ├── checkout.rs ◄─── summary, place order
//!     ├── orders.rs   ◄─── history, repeat order
//!     └── config.rs   ◄─── store details
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use bazaar_storefront::{Storefront, StorefrontConfig};
//!
//! # async fn demo() -> Result<(), bazaar_storefront::ApiError> {
//! let storefront = Storefront::from_config(StorefrontConfig::load_or_default(None));
//! storefront.add_to_cart("8", Some(1))?;
//! let summary = storefront.checkout_summary(bazaar_core::FulfillmentType::Pickup);
//! assert!(summary.can_submit);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod seed;
pub mod state;
pub mod submit;

use std::sync::Arc;

use bazaar_core::checkout::CheckoutForm;
use bazaar_core::{CartObserver, Catalog, CatalogQuery, Category, CheckoutPhase, FulfillmentType, Order, Product};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use commands::{
    CartResponse, CatalogResponse, CheckoutSummary, OrderConfirmation, PaymentOption,
    PromotionsResponse, ReorderResponse, StoreInfo,
};
pub use config::StorefrontConfig;
pub use error::{ApiError, ErrorCode, StorefrontError, StorefrontResult};
pub use state::{CartState, CatalogState, CheckoutState, OrderFilter, OrderState};
pub use submit::{ImmediateSubmitter, OrderReceipt, OrderSubmitter, SimulatedSubmitter, SubmitError};

/// One shopper's session.
///
/// Holds every state object; each method forwards to the matching command
/// with just the state that command needs. Share it across tasks with `Arc`.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: CatalogState,
    cart: CartState,
    checkout: CheckoutState,
    orders: OrderState,
}

impl Storefront {
    pub fn new(config: StorefrontConfig, catalog: Catalog, submitter: Arc<dyn OrderSubmitter>) -> Self {
        info!(
            store = %config.store.name,
            products = catalog.len(),
            "Storefront session started"
        );

        Storefront {
            config,
            catalog: CatalogState::new(catalog),
            cart: CartState::new(),
            checkout: CheckoutState::new(submitter),
            orders: OrderState::new(),
        }
    }

    /// Demo catalog and a simulated submitter using the configured delay.
    pub fn from_config(config: StorefrontConfig) -> Self {
        let submitter = SimulatedSubmitter::new(config.checkout.submit_delay());
        Storefront::new(config, seed::demo_catalog(), Arc::new(submitter))
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn checkout(&self) -> &CheckoutState {
        &self.checkout
    }

    pub fn orders(&self) -> &OrderState {
        &self.orders
    }

    /// Registers a cart observer (badge counter, persistence, ...).
    pub fn subscribe(&self, observer: Box<dyn CartObserver>) {
        self.cart.subscribe(observer);
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn browse_catalog(&self, query: CatalogQuery) -> Result<CatalogResponse, ApiError> {
        commands::catalog::browse_catalog(&self.catalog, query)
    }

    pub fn get_product(&self, product_id: &str) -> Result<Product, ApiError> {
        commands::catalog::get_product(&self.catalog, product_id)
    }

    pub fn get_categories(&self) -> Vec<Category> {
        commands::catalog::get_categories(&self.catalog)
    }

    pub fn get_promotions(&self) -> PromotionsResponse {
        commands::catalog::get_promotions(&self.catalog)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn get_cart(&self) -> CartResponse {
        commands::cart::get_cart(&self.config, &self.cart)
    }

    pub fn add_to_cart(&self, product_id: &str, quantity: Option<i64>) -> Result<CartResponse, ApiError> {
        commands::cart::add_to_cart(&self.config, &self.catalog, &self.cart, product_id, quantity)
    }

    pub fn update_cart_item(&self, product_id: &str, quantity: i64) -> Result<CartResponse, ApiError> {
        commands::cart::update_cart_item(&self.config, &self.cart, product_id, quantity)
    }

    pub fn remove_from_cart(&self, product_id: &str) -> CartResponse {
        commands::cart::remove_from_cart(&self.config, &self.cart, product_id)
    }

    pub fn clear_cart(&self) -> CartResponse {
        commands::cart::clear_cart(&self.config, &self.cart)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    pub fn checkout_summary(&self, fulfillment: FulfillmentType) -> CheckoutSummary {
        commands::checkout::checkout_summary(&self.config, &self.cart, &self.checkout, fulfillment)
    }

    pub async fn place_order(&self, form: CheckoutForm) -> Result<OrderConfirmation, ApiError> {
        commands::checkout::place_order(&self.config, &self.cart, &self.checkout, &self.orders, form).await
    }

    pub fn reset_checkout(&self) -> CheckoutPhase {
        commands::checkout::reset_checkout(&self.checkout)
    }

    // =========================================================================
    // Orders & Store
    // =========================================================================

    pub fn list_orders(&self, filter: OrderFilter) -> Vec<Order> {
        commands::orders::list_orders(&self.orders, filter)
    }

    pub fn get_order(&self, order_id: &str) -> Result<Order, ApiError> {
        commands::orders::get_order(&self.orders, order_id)
    }

    pub fn reorder(&self, order_id: &str) -> Result<ReorderResponse, ApiError> {
        commands::orders::reorder(&self.config, &self.catalog, &self.cart, &self.orders, order_id)
    }

    pub fn get_store_info(&self) -> StoreInfo {
        commands::config::get_store_info(&self.config)
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bazaar_core=trace` - Trace the core crate only
/// - Default: INFO, DEBUG for the bazaar crates
///
/// Calling it again once a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bazaar=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// =============================================================================
// Session Tests
// =============================================================================
