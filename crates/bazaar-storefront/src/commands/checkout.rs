//! # Checkout Commands
//!
//! The order summary panel and order placement.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order                                          │
//! │                                                                         │
//! │  ┌─ lock checkout ─┬─ lock cart ──────────────────────────────────┐     │
//! │  │                 │  flow.begin(form, cart)                      │     │
//! │  │                 │    ├── invalid ──► Rejected, CHECKOUT_REJECTED│    │
//! │  │                 │    └── valid ────► Submitting, Order          │    │
//! │  └─────────────────┴──────────────────────────────────────────────┘     │
//! │                          │ (locks released)                             │
//! │                          ▼                                              │
//! │                 submitter.submit(&order).await                          │
//! │                    │                     │                              │
//! │                   Ok                    Err                             │
//! │                    ▼                     ▼                              │
//! │  flow.complete(cart) (clears)   flow.abort() (cart kept)                │
//! │  history.record(order)          SUBMISSION_FAILED                       │
//! │                                                                         │
//! │  future dropped mid-submit ──► guard aborts, back to CollectingInput    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bazaar_core::checkout::CheckoutForm;
use bazaar_core::{CheckoutPhase, FulfillmentType, Order, PaymentMethod, PriceQuote};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::config::{StorefrontConfig, TimeSlot};
use crate::error::{ApiError, StorefrontError};
use crate::state::{CartState, CheckoutState, OrderState};

/// A payment option as listed on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentOption {
    pub method: PaymentMethod,
    pub label: String,
}

/// Everything the checkout page shows besides the form itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    pub fulfillment: FulfillmentType,
    pub item_count: i64,
    pub quote: PriceQuote,
    pub time_slots: Vec<TimeSlot>,
    pub payment_methods: Vec<PaymentOption>,
    pub phase: CheckoutPhase,
    /// Non-empty cart at or above the minimum, with nothing in flight.
    pub can_submit: bool,
}

/// Returned once the store has accepted an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    pub order: Order,
    pub order_number: String,
    /// "Заказ #482913 принят"
    pub message: String,
}

fn payment_options() -> Vec<PaymentOption> {
    [PaymentMethod::KaspiPay, PaymentMethod::KaspiQr, PaymentMethod::Cash]
        .into_iter()
        .map(|method| PaymentOption {
            method,
            label: method.label().to_string(),
        })
        .collect()
}

/// Prices the current cart for the chosen fulfillment.
pub fn checkout_summary(
    config: &StorefrontConfig,
    cart: &CartState,
    checkout: &CheckoutState,
    fulfillment: FulfillmentType,
) -> CheckoutSummary {
    debug!(fulfillment = ?fulfillment, "checkout_summary command");

    let phase = checkout.phase();
    let (item_count, subtotal) = cart.with_cart(|store| (store.item_count(), store.total()));
    let quote = config.delivery_policy().quote(subtotal, fulfillment);

    CheckoutSummary {
        fulfillment,
        item_count,
        quote,
        time_slots: config.delivery.time_slots.clone(),
        payment_methods: payment_options(),
        phase,
        can_submit: item_count > 0 && quote.meets_minimum && phase != CheckoutPhase::Submitting,
    }
}

/// Validates the form, submits the order and clears the cart on success.
///
/// ## Errors
/// - `CHECKOUT_REJECTED` with one issue per problem; the cart is unchanged
/// - `ALREADY_SUBMITTING` while an earlier call is still waiting
/// - `SUBMISSION_FAILED` when the submitter fails; the cart is unchanged
///   and the form can be submitted again
pub async fn place_order(
    config: &StorefrontConfig,
    cart: &CartState,
    checkout: &CheckoutState,
    orders: &OrderState,
    form: CheckoutForm,
) -> Result<OrderConfirmation, ApiError> {
    debug!(
        fulfillment = ?form.fulfillment,
        time_slot = %form.time_slot,
        payment = ?form.payment_method,
        "place_order command"
    );

    let policy = config.delivery_policy();
    let slots = config.delivery.slot_ids();

    let mut order = checkout.with_flow(|flow| {
        cart.with_cart(|store| flow.begin(&form, store.cart(), &policy, &slots))
    })?;
    let guard = checkout.guard_submission();

    let submitter = checkout.submitter();
    let outcome = submitter.submit(&order).await;
    guard.disarm();

    let receipt = match outcome {
        Ok(receipt) => receipt,
        Err(e) => {
            checkout.with_flow(|flow| flow.abort())?;
            return Err(StorefrontError::Submission(e).into());
        }
    };

    checkout.with_flow(|flow| cart.with_cart_mut(|store| flow.complete(store)))?;

    order.order_number = Some(receipt.order_number.clone());
    orders.with_history(|history| history.record(order.clone()));

    info!(
        order_id = %order.id,
        order_number = %receipt.order_number,
        total = %order.total,
        items = order.items.len(),
        "Order placed"
    );

    Ok(OrderConfirmation {
        message: format!("Заказ #{} принят", receipt.order_number),
        order_number: receipt.order_number,
        order,
    })
}

/// Returns to an empty form after the success or rejection screen.
pub fn reset_checkout(checkout: &CheckoutState) -> CheckoutPhase {
    debug!("reset_checkout command");
    checkout.with_flow(|flow| {
        flow.reset();
        flow.phase()
    })
}
