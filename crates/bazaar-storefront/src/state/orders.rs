//! # Order History
//!
//! Orders placed during this session, newest first. Nothing is persisted;
//! a new session starts with an empty history.
//!
//! ## "Мои заказы" Tabs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ Все ]  [ Активные ]  [ Доставленные ]                                │
//! │     │          │              │                                         │
//! │    All       Active        Delivered                                    │
//! │            pending,                                                     │
//! │            preparing,                                                   │
//! │            ready                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use bazaar_core::{Order, OrderStatus};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::lock;

/// Which orders the history tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderFilter {
    #[default]
    All,
    Active,
    Delivered,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Active => order.status.is_active(),
            OrderFilter::Delivered => order.status == OrderStatus::Delivered,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderFilter::All => "Все",
            OrderFilter::Active => "Активные",
            OrderFilter::Delivered => "Доставленные",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderHistory {
    /// Newest first.
    orders: Vec<Order>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    pub fn list(&self, filter: OrderFilter) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect()
    }

    /// Finds an order by id or by its shopper-facing number.
    pub fn find(&self, key: &str) -> Option<&Order> {
        self.orders
            .iter()
            .find(|o| o.id == key || o.order_number.as_deref() == Some(key))
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct OrderState {
    history: Mutex<OrderHistory>,
}

impl OrderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderHistory) -> R,
    {
        let mut history = lock(&self.history);
        f(&mut history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::checkout::{build_order, CheckoutForm};
    use bazaar_core::{Cart, DeliveryPolicy, Money, Product};

    fn order(number: &str) -> Order {
        let mut cart = Cart::new();
        cart.add_quantity(&Product::new("10", "Макароны спагетти", Money::from_tenge(420), "grocery"), 5);
        let mut order = build_order(&CheckoutForm::default(), &cart, &DeliveryPolicy::default());
        order.order_number = Some(number.to_string());
        order
    }

    fn with_status(mut order: Order, status: OrderStatus) -> Order {
        order.status = status;
        order
    }

    #[test]
    fn test_newest_first_and_lookup() {
        let mut history = OrderHistory::new();
        history.record(order("123455"));
        history.record(order("123456"));

        let all = history.list(OrderFilter::All);
        assert_eq!(all[0].order_number.as_deref(), Some("123456"));
        assert_eq!(history.len(), 2);

        let by_number = history.find("123455").unwrap();
        assert!(history.find(&by_number.id).is_some());
        assert!(history.find("000000").is_none());
    }

    #[test]
    fn test_filters() {
        let mut history = OrderHistory::new();
        history.record(order("1"));
        history.record(with_status(order("2"), OrderStatus::Delivered));
        history.record(with_status(order("3"), OrderStatus::Cancelled));

        let active = history.list(OrderFilter::Active);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].order_number.as_deref(), Some("1"));

        let delivered = history.list(OrderFilter::Delivered);
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].order_number.as_deref(), Some("2"));

        assert_eq!(history.list(OrderFilter::All).len(), 3);
        assert_eq!(OrderFilter::Active.label(), "Активные");
    }
}
