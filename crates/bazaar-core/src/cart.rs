//! # Cart
//!
//! The shopping cart data and its arithmetic.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Cart Method             Effect                │
//! │  ──────────────           ───────────             ──────                │
//! │                                                                         │
//! │  Tap "+" on card ────────► add_item() ──────────► qty += 1 or insert   │
//! │                                                                         │
//! │  Tap "−" in drawer ──────► update_quantity() ───► qty = n, ≤0 removes  │
//! │                                                                         │
//! │  Tap trash icon ─────────► remove_item() ───────► entry deleted        │
//! │                                                                         │
//! │  "Очистить" / order ─────► clear() ─────────────► items emptied        │
//! │                                                                         │
//! │  Operations on an id that is not in the cart are silent no-ops.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::validation::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Item
// =============================================================================

/// A product in the cart together with its quantity.
///
/// The product is a snapshot taken when it was first added; it serializes
/// flattened so a cart line looks like a product with a `quantity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Always ≥ 1 while the item is in a cart.
    pub quantity: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart line for `product` with the given quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product: product.clone(),
            quantity,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity, using the current price (never `old_price`).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id (adding the same product bumps quantity)
/// - Every stored quantity is ≥ 1 (setting ≤ 0 removes the item)
/// - Insertion order is preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of `product`.
    ///
    /// Returns the product's quantity after the call.
    pub fn add_item(&mut self, product: &Product) -> i64 {
        self.add_quantity(product, 1)
    }

    /// Adds `quantity` units of `product`, inserting a line if needed.
    ///
    /// Non-positive quantities are ignored and a line never goes above
    /// [`MAX_ITEM_QUANTITY`]. Returns the resulting quantity (0 if the
    /// product is not in the cart).
    pub fn add_quantity(&mut self, product: &Product, quantity: i64) -> i64 {
        if quantity <= 0 {
            return self.quantity_of(&product.id);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity).min(MAX_ITEM_QUANTITY);
            return item.quantity;
        }

        let quantity = quantity.min(MAX_ITEM_QUANTITY);
        self.items.push(CartItem::from_product(product, quantity));
        quantity
    }

    /// Adds every line's quantity, merging with lines already present.
    ///
    /// Used by "repeat order". Returns `true` if anything was added.
    pub fn add_items(&mut self, items: &[CartItem]) -> bool {
        let mut changed = false;
        for item in items.iter().filter(|i| i.quantity > 0) {
            self.add_quantity(&item.product, item.quantity);
            changed = true;
        }
        changed
    }

    /// Sets the quantity of an item already in the cart.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: the item is removed
    /// - product not in cart: no-op, nothing is inserted
    /// - above [`MAX_ITEM_QUANTITY`]: clamped
    ///
    /// Returns `true` if the cart changed.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        let quantity = quantity.min(MAX_ITEM_QUANTITY);

        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Removes an item by product id. Returns `true` if something was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != initial_len
    }

    /// Removes every item. Returns `true` if the cart was non-empty.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Quantity of a product, or 0 when it is not in the cart.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .find(|i| i.product.id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Sum of quantities across all lines (the badge number).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct products.
    pub fn distinct_items(&self) -> usize {
        self.items.len()
    }

    /// Sum of `price × quantity` across all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived cart aggregates for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: i64,
    pub distinct_items: usize,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            distinct_items: cart.distinct_items(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_tenge(price), "test")
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let mut cart = Cart::new();
        let product = test_product("1", 320);

        for _ in 0..7 {
            cart.add_item(&product);
        }

        assert_eq!(cart.item_count(), 7);
        assert_eq!(cart.distinct_items(), 1);
        assert_eq!(cart.quantity_of("1"), 7);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = Cart::new();
        let bread = test_product("1", 320);
        let milk = test_product("2", 650);
        cart.add_item(&bread);
        cart.add_item(&milk);

        assert!(cart.update_quantity("1", 0));
        assert_eq!(cart.quantity_of("1"), 0);

        assert!(cart.update_quantity("2", -1));
        assert!(cart.is_empty());

        // Removed ids are not resurrected.
        assert!(!cart.update_quantity("1", 5));
        assert!(!cart.update_quantity("2", 3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100));

        assert!(cart.update_quantity("1", 4));
        assert_eq!(cart.item_count(), 4);
        assert!(!cart.update_quantity("1", 4));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100));

        assert!(!cart.remove_item("nope"));
        assert_eq!(cart.distinct_items(), 1);
        assert!(cart.remove_item("1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_ignores_old_price() {
        let mut cart = Cart::new();
        let mut sale = test_product("1", 520);
        sale.old_price = Some(Money::from_tenge(650));
        let bread = test_product("2", 320);

        cart.add_item(&sale);
        cart.add_item(&sale);
        cart.add_item(&bread);

        assert_eq!(cart.total(), Money::from_tenge(520 * 2 + 320));
    }

    #[test]
    fn test_clear_zeroes_derived_reads() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 999));
        cart.add_item(&test_product("2", 1));

        assert!(cart.clear());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.total().is_zero());
        assert!(!cart.clear());
    }

    #[test]
    fn test_add_quantity_ignores_non_positive() {
        let mut cart = Cart::new();
        let p = test_product("1", 100);

        assert_eq!(cart.add_quantity(&p, 0), 0);
        assert_eq!(cart.add_quantity(&p, -2), 0);
        assert!(cart.is_empty());

        assert_eq!(cart.add_quantity(&p, 3), 3);
        assert_eq!(cart.add_quantity(&p, 2), 5);
    }

    #[test]
    fn test_add_items_merges_lines() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100));

        let previous = vec![
            CartItem::from_product(&test_product("1", 100), 2),
            CartItem::from_product(&test_product("2", 50), 4),
        ];
        assert!(cart.add_items(&previous));
        assert_eq!(cart.quantity_of("1"), 3);
        assert_eq!(cart.quantity_of("2"), 4);
        assert_eq!(cart.distinct_items(), 2);

        assert!(!cart.add_items(&[]));
    }

    #[test]
    fn test_totals_from_cart() {
        let mut cart = Cart::new();
        cart.add_quantity(&test_product("1", 420), 2);
        cart.add_item(&test_product("2", 590));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.distinct_items, 2);
        assert_eq!(totals.total, Money::from_tenge(1430));
    }

    #[test]
    fn test_quantity_capped() {
        let mut cart = Cart::new();
        let cheese = test_product("8", 2890);

        assert_eq!(cart.add_quantity(&cheese, i64::MAX), MAX_ITEM_QUANTITY);
        assert_eq!(cart.add_quantity(&cheese, 5), MAX_ITEM_QUANTITY);

        cart.update_quantity("8", 10);
        let merged = [CartItem::from_product(&cheese, i64::MAX)];
        assert!(cart.add_items(&merged));
        assert_eq!(cart.quantity_of("8"), MAX_ITEM_QUANTITY);

        assert!(cart.update_quantity("8", i64::MAX / 1000));
        assert_eq!(cart.quantity_of("8"), MAX_ITEM_QUANTITY);
        assert_eq!(cart.total(), Money::from_tenge(2890 * 999));
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem::from_product(&test_product("7", 380), 3);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["price"], 380);
        assert_eq!(json["quantity"], 3);
    }
}
