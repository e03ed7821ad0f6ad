//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │        │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │                        │                                 │              │
//! │                   add_to_cart                      place_order          │
//! │                   update_cart_item                 (checkout.rs)        │
//! │                   remove_from_cart                 clears the cart      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                    │
//! │                                                      (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bazaar_core::validation::validate_quantity;
use bazaar_core::{CartItem, CartSnapshot, CartTotals, CoreError, FulfillmentType, PriceQuote};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// Cart contents with totals and the delivery pricing preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    /// Priced as a delivery; the checkout summary reprices for pickup.
    pub quote: PriceQuote,
    /// "Добавьте ещё 1 500₸ для бесплатной доставки", or `None` once
    /// delivery is free or the cart is empty.
    pub free_delivery_hint: Option<String>,
}

impl CartResponse {
    pub fn build(snapshot: CartSnapshot, config: &StorefrontConfig) -> Self {
        let quote = config
            .delivery_policy()
            .quote(snapshot.totals.total, FulfillmentType::Delivery);

        let free_delivery_hint = if snapshot.items.is_empty()
            || quote.remaining_for_free_delivery.is_zero()
        {
            None
        } else {
            Some(format!(
                "Добавьте ещё {} для бесплатной доставки",
                config.format_price(quote.remaining_for_free_delivery)
            ))
        };

        CartResponse {
            items: snapshot.items,
            totals: snapshot.totals,
            quote,
            free_delivery_hint,
        }
    }
}

fn respond(config: &StorefrontConfig, cart: &CartState) -> CartResponse {
    CartResponse::build(cart.with_cart(|store| store.snapshot()), config)
}

/// Gets the current cart contents.
pub fn get_cart(config: &StorefrontConfig, cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    respond(config, cart)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new line with a product snapshot
///
/// ## Arguments
/// * `product_id` - Catalog product id
/// * `quantity` - Quantity to add (default: 1)
///
/// ## Errors
/// - `NOT_FOUND` for unknown products
/// - `OUT_OF_STOCK` for sold out products
/// - `VALIDATION_ERROR` for a non-positive quantity, or when the line
///   would go above 999
pub fn add_to_cart(
    config: &StorefrontConfig,
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    validate_quantity(quantity).map_err(CoreError::from)?;
    let product = catalog.purchasable(product_id)?;

    cart.with_cart_mut(|store| {
        let resulting = store.quantity_of(product_id).saturating_add(quantity);
        validate_quantity(resulting).map_err(CoreError::from)?;
        store.add_quantity(product, quantity);
        Ok::<_, CoreError>(())
    })?;

    Ok(respond(config, cart))
}

/// Sets the quantity of a cart line.
///
/// A quantity of zero or less removes the line. Unknown products are
/// ignored; nothing is added back.
///
/// ## Errors
/// `VALIDATION_ERROR` above 999; the line keeps its quantity.
pub fn update_cart_item(
    config: &StorefrontConfig,
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    if quantity > 0 {
        validate_quantity(quantity).map_err(CoreError::from)?;
    }

    cart.with_cart_mut(|store| store.update_quantity(product_id, quantity));
    Ok(respond(config, cart))
}

/// Removes a line from the cart. No-op for products not in the cart.
pub fn remove_from_cart(config: &StorefrontConfig, cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    cart.with_cart_mut(|store| store.remove_item(product_id));
    respond(config, cart)
}

/// Empties the cart.
pub fn clear_cart(config: &StorefrontConfig, cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|store| store.clear());
    respond(config, cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::seed::demo_catalog;
    use bazaar_core::Money;

    fn setup() -> (StorefrontConfig, CatalogState, CartState) {
        (
            StorefrontConfig::default(),
            CatalogState::new(demo_catalog()),
            CartState::new(),
        )
    }

    #[test]
    fn test_add_and_hint() {
        let (config, catalog, cart) = setup();

        let response = add_to_cart(&config, &catalog, &cart, "1", None).unwrap();
        assert_eq!(response.totals.item_count, 1);
        assert_eq!(response.quote.delivery_fee, Money::from_tenge(500));
        assert_eq!(
            response.free_delivery_hint.as_deref(),
            Some("Добавьте ещё 4 680₸ для бесплатной доставки")
        );

        // 2890 * 2 + 320 = 6100, past the free delivery threshold
        let response = add_to_cart(&config, &catalog, &cart, "8", Some(2)).unwrap();
        assert_eq!(response.totals.total, Money::from_tenge(6100));
        assert!(response.quote.is_delivery_free());
        assert!(response.free_delivery_hint.is_none());
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let (config, catalog, cart) = setup();

        let err = add_to_cart(&config, &catalog, &cart, "6", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfStock);

        let err = add_to_cart(&config, &catalog, &cart, "404", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&config, &catalog, &cart, "1", Some(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(get_cart(&config, &cart).items.is_empty());
    }

    #[test]
    fn test_quantity_limits() {
        let (config, catalog, cart) = setup();
        add_to_cart(&config, &catalog, &cart, "8", Some(990)).unwrap();

        let err = add_to_cart(&config, &catalog, &cart, "8", Some(10)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = add_to_cart(&config, &catalog, &cart, "1", Some(i64::MAX)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = update_cart_item(&config, &cart, "8", i64::MAX / 1000).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        // the session still prices the cart afterwards
        let response = get_cart(&config, &cart);
        assert_eq!(response.totals.item_count, 990);
        assert_eq!(response.totals.total, Money::from_tenge(2890 * 990));

        let response = update_cart_item(&config, &cart, "8", 999).unwrap();
        assert_eq!(response.totals.item_count, 999);
        let response = update_cart_item(&config, &cart, "8", -1).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_update_remove_clear() {
        let (config, catalog, cart) = setup();
        add_to_cart(&config, &catalog, &cart, "1", Some(3)).unwrap();
        add_to_cart(&config, &catalog, &cart, "5", None).unwrap();

        let response = update_cart_item(&config, &cart, "1", 1).unwrap();
        assert_eq!(response.totals.item_count, 2);

        let response = update_cart_item(&config, &cart, "1", 0).unwrap();
        assert_eq!(response.totals.distinct_items, 1);

        // no resurrection
        let response = update_cart_item(&config, &cart, "1", 4).unwrap();
        assert_eq!(response.totals.distinct_items, 1);

        let response = remove_from_cart(&config, &cart, "5");
        assert!(response.items.is_empty());

        add_to_cart(&config, &catalog, &cart, "5", None).unwrap();
        let response = clear_cart(&config, &cart);
        assert_eq!(response.totals.total, Money::zero());
        assert!(response.free_delivery_hint.is_none());
    }
}
