//! # Order Commands
//!
//! "Мои заказы": the session's order history and repeat order.

use bazaar_core::{CartItem, Order};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use super::cart::CartResponse;
use crate::config::StorefrontConfig;
use crate::error::ApiError;
use crate::state::{CartState, CatalogState, OrderFilter, OrderState};

/// Cart after a repeat order, plus the lines that could not be added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReorderResponse {
    pub cart: CartResponse,
    /// Names of products no longer listed or sold out.
    pub skipped: Vec<String>,
}

/// Lists placed orders, newest first.
pub fn list_orders(orders: &OrderState, filter: OrderFilter) -> Vec<Order> {
    debug!(filter = ?filter, "list_orders command");
    orders.with_history(|history| history.list(filter))
}

/// Gets an order by id or by its six-digit number.
pub fn get_order(orders: &OrderState, order_id: &str) -> Result<Order, ApiError> {
    debug!(order_id = %order_id, "get_order command");
    orders
        .with_history(|history| history.find(order_id).cloned())
        .ok_or_else(|| ApiError::not_found("Order", order_id))
}

/// Adds a past order's lines back into the cart.
///
/// Lines are repriced from the current catalog; products that are gone or
/// sold out are skipped and reported by name.
pub fn reorder(
    config: &StorefrontConfig,
    catalog: &CatalogState,
    cart: &CartState,
    orders: &OrderState,
    order_id: &str,
) -> Result<ReorderResponse, ApiError> {
    debug!(order_id = %order_id, "reorder command");

    let order = get_order(orders, order_id)?;

    let mut lines = Vec::with_capacity(order.items.len());
    let mut skipped = Vec::new();
    for item in &order.items {
        match catalog.purchasable(item.product_id()) {
            Ok(product) => lines.push(CartItem::from_product(product, item.quantity)),
            Err(_) => skipped.push(item.product.name.clone()),
        }
    }

    cart.with_cart_mut(|store| store.add_items(&lines));
    if !skipped.is_empty() {
        info!(order_id = %order.id, skipped = skipped.len(), "Reorder skipped unavailable products");
    }

    let cart = CartResponse::build(cart.with_cart(|store| store.snapshot()), config);
    Ok(ReorderResponse { cart, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_catalog;
    use bazaar_core::checkout::{build_order, CheckoutForm};
    use bazaar_core::{Cart, DeliveryPolicy, Money, Product};

    fn past_order(catalog: &CatalogState) -> Order {
        let mut cart = Cart::new();
        let mut cheap_milk = catalog.catalog().product("5").unwrap().clone();
        cheap_milk.price = Money::from_tenge(600);
        cart.add_quantity(&cheap_milk, 2);
        cart.add_item(catalog.catalog().product("6").unwrap());
        cart.add_item(&Product::new("99", "Снятый с продажи йогурт", Money::from_tenge(300), "dairy"));

        let mut order = build_order(&CheckoutForm::default(), &cart, &DeliveryPolicy::default());
        order.order_number = Some("482913".to_string());
        order
    }

    #[test]
    fn test_reorder_reprices_and_skips() {
        let config = StorefrontConfig::default();
        let catalog = CatalogState::new(demo_catalog());
        let cart = CartState::new();
        let orders = OrderState::new();
        orders.with_history(|h| h.record(past_order(&catalog)));

        let response = reorder(&config, &catalog, &cart, &orders, "482913").unwrap();

        assert_eq!(response.cart.items.len(), 1);
        assert_eq!(response.cart.totals.item_count, 2);
        assert_eq!(response.cart.totals.total, Money::from_tenge(1300));
        assert_eq!(response.skipped, vec!["Кефир 1%", "Снятый с продажи йогурт"]);
    }

    #[test]
    fn test_lookup() {
        let catalog = CatalogState::new(demo_catalog());
        let orders = OrderState::new();
        orders.with_history(|h| h.record(past_order(&catalog)));

        assert_eq!(list_orders(&orders, OrderFilter::Active).len(), 1);
        assert!(list_orders(&orders, OrderFilter::Delivered).is_empty());
        assert!(get_order(&orders, "482913").is_ok());
        assert!(reorder(
            &StorefrontConfig::default(),
            &catalog,
            &CartState::new(),
            &orders,
            "nope"
        )
        .is_err());
    }
}
