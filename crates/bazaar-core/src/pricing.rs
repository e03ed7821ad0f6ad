//! # Checkout Pricing
//!
//! Delivery fee, grand total and the minimum-order gate.
//!
//! ## Delivery Fee Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  fulfillment == Pickup ─────────────────────────────► fee = 0           │
//! │                                                                         │
//! │  fulfillment == Delivery                                                │
//! │      ├── subtotal >= free_delivery_from ────────────► fee = 0           │
//! │      └── otherwise ─────────────────────────────────► fee = base fee    │
//! │                                                                         │
//! │  grand_total = subtotal + fee                                          │
//! │                                                                         │
//! │  Minimum order (any fulfillment): subtotal >= min_order_amount          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use bazaar_core::{DeliveryPolicy, FulfillmentType, Money};
//!
//! let policy = DeliveryPolicy::default(); // free from 5000, fee 500, min 2000
//! let quote = policy.quote(Money::from_tenge(4999), FulfillmentType::Delivery);
//! assert_eq!(quote.delivery_fee.tenge(), 500);
//! assert_eq!(quote.grand_total.tenge(), 5499);
//! assert_eq!(quote.remaining_for_free_delivery.tenge(), 1);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::FulfillmentType;

/// Free delivery threshold used when nothing is configured.
pub const DEFAULT_FREE_DELIVERY_FROM: Money = Money::from_tenge(5000);

/// Delivery fee below the free threshold.
pub const DEFAULT_DELIVERY_FEE: Money = Money::from_tenge(500);

/// Smallest cart subtotal that may be ordered.
pub const DEFAULT_MIN_ORDER_AMOUNT: Money = Money::from_tenge(2000);

/// Computes the delivery fee for a subtotal and fulfillment choice.
///
/// Pickup is always free. Delivery is free at or above `free_threshold`,
/// otherwise it costs `base_fee`.
pub fn compute_delivery_fee(
    subtotal: Money,
    fulfillment: FulfillmentType,
    free_threshold: Money,
    base_fee: Money,
) -> Money {
    match fulfillment {
        FulfillmentType::Pickup => Money::zero(),
        FulfillmentType::Delivery if subtotal >= free_threshold => Money::zero(),
        FulfillmentType::Delivery => base_fee,
    }
}

// =============================================================================
// Delivery Policy
// =============================================================================

/// Store pricing knobs for checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeliveryPolicy {
    pub free_delivery_from: Money,
    pub delivery_fee: Money,
    pub min_order_amount: Money,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        DeliveryPolicy {
            free_delivery_from: DEFAULT_FREE_DELIVERY_FROM,
            delivery_fee: DEFAULT_DELIVERY_FEE,
            min_order_amount: DEFAULT_MIN_ORDER_AMOUNT,
        }
    }
}

impl DeliveryPolicy {
    pub fn delivery_fee_for(&self, subtotal: Money, fulfillment: FulfillmentType) -> Money {
        compute_delivery_fee(
            subtotal,
            fulfillment,
            self.free_delivery_from,
            self.delivery_fee,
        )
    }

    /// True when `subtotal` reaches the minimum order amount.
    #[inline]
    pub fn meets_minimum(&self, subtotal: Money) -> bool {
        subtotal >= self.min_order_amount
    }

    /// Full price breakdown for the order summary panel.
    pub fn quote(&self, subtotal: Money, fulfillment: FulfillmentType) -> PriceQuote {
        let delivery_fee = self.delivery_fee_for(subtotal, fulfillment);
        let remaining_for_free_delivery = match fulfillment {
            FulfillmentType::Pickup => Money::zero(),
            FulfillmentType::Delivery => self.free_delivery_from.saturating_gap(subtotal),
        };

        PriceQuote {
            subtotal,
            delivery_fee,
            grand_total: subtotal + delivery_fee,
            remaining_for_free_delivery,
            meets_minimum: self.meets_minimum(subtotal),
            min_order_amount: self.min_order_amount,
        }
    }
}

/// Price breakdown for a subtotal under a [`DeliveryPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceQuote {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub grand_total: Money,
    /// How much more to add for free delivery ("ещё N₸"); zero once reached.
    pub remaining_for_free_delivery: Money,
    pub meets_minimum: bool,
    pub min_order_amount: Money,
}

impl PriceQuote {
    pub fn is_delivery_free(&self) -> bool {
        self.delivery_fee.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
