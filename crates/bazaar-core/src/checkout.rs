//! # Checkout
//!
//! Form validation, order construction and the checkout state machine.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────────┐   begin() ok    ┌──────────────┐                  │
//! │  │ CollectingInput  │ ──────────────► │  Submitting  │                  │
//! │  └──────────────────┘                 └──────────────┘                  │
//! │     ▲        │                          │         │                     │
//! │     │        │ begin() finds issues     │         │ complete()          │
//! │     │        ▼                          │         ▼                     │
//! │     │   ┌──────────┐       abort()      │   ┌─────────────┐             │
//! │     │   │ Rejected │ ◄─ (cart kept)     │   │  Succeeded  │ cart clear  │
//! │     │   └──────────┘                    │   └─────────────┘             │
//! │     └───────────────────────────────────┘                               │
//! │                                                                         │
//! │  begin() while Submitting ──► CoreError::AlreadySubmitting              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual submission (network call, simulated delay) happens outside
//! this crate between `begin()` and `complete()`/`abort()`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CheckoutIssue, CheckoutRejection, CoreError, CoreResult};
use crate::pricing::DeliveryPolicy;
use crate::store::CartStore;
use crate::types::{
    DeliveryAddress, FulfillmentType, Order, OrderStatus, OrderType, PaymentMethod,
};
use crate::validation::{validate_comment, validate_phone, validate_time_slot};

/// Time slot id meaning "as soon as possible".
pub const ASAP_SLOT: &str = "asap";

// =============================================================================
// Checkout Form
// =============================================================================

/// Everything the shopper fills in on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CheckoutForm {
    pub fulfillment: FulfillmentType,
    /// Resolved address; ignored for pickup.
    pub address: Option<DeliveryAddress>,
    pub phone: String,
    pub time_slot: String,
    pub comment: Option<String>,
    pub payment_method: PaymentMethod,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        CheckoutForm {
            fulfillment: FulfillmentType::Delivery,
            address: None,
            phone: String::new(),
            time_slot: ASAP_SLOT.to_string(),
            comment: None,
            payment_method: PaymentMethod::KaspiPay,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Checks a checkout form against the cart and store policy.
///
/// Every problem is collected; nothing short-circuits. Issues appear in the
/// order the checkout page shows them (cart, address, phone, slot, minimum).
/// `offered_slots` may be empty to skip the time slot check.
///
/// ## Example
/// ```rust
/// use bazaar_core::checkout::{validate_checkout, CheckoutForm};
/// use bazaar_core::{Cart, CheckoutIssue, DeliveryPolicy, FulfillmentType, Money, Product};
///
/// let mut cart = Cart::new();
/// cart.add_item(&Product::new("1", "Хлеб", Money::from_tenge(320), "bakery"));
///
/// let form = CheckoutForm {
///     fulfillment: FulfillmentType::Pickup,
///     phone: "+7 701 123 45 67".to_string(),
///     ..CheckoutForm::default()
/// };
///
/// let rejection = validate_checkout(&form, &cart, &DeliveryPolicy::default(), &[]).unwrap_err();
/// assert_eq!(rejection.issues.len(), 1);
/// assert!(rejection.contains(&CheckoutIssue::BelowMinimumOrder {
///     minimum: Money::zero(),
///     subtotal: Money::zero(),
/// }));
/// ```
pub fn validate_checkout(
    form: &CheckoutForm,
    cart: &Cart,
    policy: &DeliveryPolicy,
    offered_slots: &[String],
) -> Result<(), CheckoutRejection> {
    let mut issues = Vec::new();

    if cart.is_empty() {
        issues.push(CheckoutIssue::EmptyCart);
    }

    if form.fulfillment == FulfillmentType::Delivery {
        match form.address.as_ref().filter(|a| !a.text.trim().is_empty()) {
            None => issues.push(CheckoutIssue::AddressRequired),
            Some(address) if !address.in_zone => {
                issues.push(CheckoutIssue::OutsideDeliveryZone {
                    address: address.text.trim().to_string(),
                })
            }
            Some(_) => {}
        }
    }

    if form.phone.trim().is_empty() {
        issues.push(CheckoutIssue::PhoneRequired);
    } else if let Err(e) = validate_phone(&form.phone) {
        issues.push(CheckoutIssue::Invalid(e));
    }

    if !offered_slots.is_empty() && validate_time_slot(&form.time_slot, offered_slots).is_err() {
        issues.push(CheckoutIssue::UnknownTimeSlot {
            slot: form.time_slot.clone(),
        });
    }

    if let Err(e) = validate_comment(form.comment.as_deref()) {
        issues.push(CheckoutIssue::Invalid(e));
    }

    // An empty cart already explains itself.
    let subtotal = cart.total();
    if !cart.is_empty() && !policy.meets_minimum(subtotal) {
        issues.push(CheckoutIssue::BelowMinimumOrder {
            minimum: policy.min_order_amount,
            subtotal,
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(CheckoutRejection { issues })
    }
}

/// Builds a pending order from a cart and an already validated form.
pub fn build_order(form: &CheckoutForm, cart: &Cart, policy: &DeliveryPolicy) -> Order {
    let subtotal = cart.total();
    let delivery_fee = policy.delivery_fee_for(subtotal, form.fulfillment);

    let address = match form.fulfillment {
        FulfillmentType::Delivery => form.address.as_ref().map(|a| a.text.trim().to_string()),
        FulfillmentType::Pickup => None,
    };

    Order {
        id: Uuid::new_v4().to_string(),
        order_number: None,
        items: cart.items().to_vec(),
        subtotal,
        delivery_fee,
        total: subtotal + delivery_fee,
        order_type: OrderType {
            kind: form.fulfillment,
            address,
            time_slot: form.time_slot.clone(),
            comment: validate_comment(form.comment.as_deref()).ok().flatten(),
        },
        payment_method: form.payment_method,
        contact_phone: form.phone.trim().to_string(),
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    }
}

// =============================================================================
// State Machine
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutPhase {
    #[default]
    CollectingInput,
    Submitting,
    Succeeded,
    /// Last attempt failed validation; the form stays editable.
    Rejected,
}

/// Drives one shopper's checkout through its phases.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
    pending_order: Option<String>,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == CheckoutPhase::Submitting
    }

    /// Validates and, on success, moves to `Submitting` and returns the
    /// order to hand to the submitter.
    ///
    /// ## Errors
    /// - `CoreError::AlreadySubmitting` if a submission is in flight
    /// - `CoreError::CheckoutRejected` with every issue found; the cart is
    ///   not touched
    pub fn begin(
        &mut self,
        form: &CheckoutForm,
        cart: &Cart,
        policy: &DeliveryPolicy,
        offered_slots: &[String],
    ) -> CoreResult<Order> {
        if self.is_submitting() {
            return Err(CoreError::AlreadySubmitting);
        }

        if let Err(rejection) = validate_checkout(form, cart, policy, offered_slots) {
            debug!(issues = rejection.issues.len(), "checkout rejected");
            self.phase = CheckoutPhase::Rejected;
            return Err(rejection.into());
        }

        let order = build_order(form, cart, policy);
        debug!(order_id = %order.id, total = %order.total, "checkout submitting");
        self.pending_order = Some(order.id.clone());
        self.phase = CheckoutPhase::Submitting;
        Ok(order)
    }

    /// Submission accepted: clears the cart and moves to `Succeeded`.
    pub fn complete(&mut self, store: &mut CartStore) -> CoreResult<()> {
        if !self.is_submitting() {
            return Err(CoreError::NotSubmitting);
        }

        store.clear();
        info!(order_id = ?self.pending_order, "checkout succeeded");
        self.pending_order = None;
        self.phase = CheckoutPhase::Succeeded;
        Ok(())
    }

    /// Submission failed: back to collecting input, cart untouched.
    pub fn abort(&mut self) -> CoreResult<()> {
        if !self.is_submitting() {
            return Err(CoreError::NotSubmitting);
        }

        debug!(order_id = ?self.pending_order, "checkout aborted");
        self.pending_order = None;
        self.phase = CheckoutPhase::CollectingInput;
        Ok(())
    }

    /// Leaves the success/rejected screen for a fresh form.
    pub fn reset(&mut self) {
        if !self.is_submitting() {
            self.phase = CheckoutPhase::CollectingInput;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::store::{CartObserver, CartSnapshot};
    use crate::types::Product;
    use std::sync::{Arc, Mutex};

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Товар {}", id), Money::from_tenge(price), "grocery")
    }

    fn delivery_form() -> CheckoutForm {
        CheckoutForm {
            fulfillment: FulfillmentType::Delivery,
            address: Some(DeliveryAddress::new("Астана, ул. Кенесары 40", true)),
            phone: "+7 701 123 45 67".to_string(),
            ..CheckoutForm::default()
        }
    }

    fn cart_worth(tenge: i64) -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&product("1", tenge));
        cart
    }

    fn slots() -> Vec<String> {
        vec!["asap".to_string(), "12-14".to_string()]
    }

    #[derive(Clone, Default)]
    struct ClearCounter(Arc<Mutex<usize>>);

    impl CartObserver for ClearCounter {
        fn on_cart_changed(&self, snapshot: &CartSnapshot) {
            if snapshot.items.is_empty() {
                *self.0.lock().unwrap() += 1;
            }
        }
    }

    #[test]
    fn test_valid_delivery_passes() {
        let cart = cart_worth(3000);
        assert!(validate_checkout(&delivery_form(), &cart, &DeliveryPolicy::default(), &slots()).is_ok());
    }

    #[test]
    fn test_all_issues_reported() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 500));

        let form = CheckoutForm {
            fulfillment: FulfillmentType::Delivery,
            address: None,
            phone: "  ".to_string(),
            time_slot: "03-05".to_string(),
            ..CheckoutForm::default()
        };

        let rejection =
            validate_checkout(&form, &cart, &DeliveryPolicy::default(), &slots()).unwrap_err();
        let codes: Vec<_> = rejection.issues.iter().map(CheckoutIssue::code).collect();
        assert_eq!(
            codes,
            vec![
                "ADDRESS_REQUIRED",
                "PHONE_REQUIRED",
                "UNKNOWN_TIME_SLOT",
                "BELOW_MINIMUM_ORDER"
            ]
        );
    }

    #[test]
    fn test_outside_zone() {
        let mut form = delivery_form();
        form.address = Some(DeliveryAddress::new("Караганда, ул. Бухар-Жырау 1", false));

        let rejection =
            validate_checkout(&form, &cart_worth(3000), &DeliveryPolicy::default(), &[])
                .unwrap_err();
        assert_eq!(
            rejection.issues,
            vec![CheckoutIssue::OutsideDeliveryZone {
                address: "Караганда, ул. Бухар-Жырау 1".to_string()
            }]
        );
    }

    #[test]
    fn test_pickup_needs_no_address() {
        let form = CheckoutForm {
            fulfillment: FulfillmentType::Pickup,
            address: None,
            phone: "87011234567".to_string(),
            ..CheckoutForm::default()
        };
        assert!(validate_checkout(&form, &cart_worth(2000), &DeliveryPolicy::default(), &[]).is_ok());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let rejection =
            validate_checkout(&delivery_form(), &Cart::new(), &DeliveryPolicy::default(), &[])
                .unwrap_err();
        assert_eq!(rejection.issues, vec![CheckoutIssue::EmptyCart]);
    }

    #[test]
    fn test_minimum_applies_to_pickup_too() {
        let form = CheckoutForm {
            fulfillment: FulfillmentType::Pickup,
            phone: "87011234567".to_string(),
            ..CheckoutForm::default()
        };
        let rejection =
            validate_checkout(&form, &cart_worth(1999), &DeliveryPolicy::default(), &[])
                .unwrap_err();
        assert!(rejection.contains(&CheckoutIssue::BelowMinimumOrder {
            minimum: Money::zero(),
            subtotal: Money::zero(),
        }));
    }

    #[test]
    fn test_build_order_prices_and_snapshot() {
        let mut cart = Cart::new();
        cart.add_quantity(&product("1", 1500), 3);

        let mut form = delivery_form();
        form.comment = Some("  домофон 12 ".to_string());

        let order = build_order(&form, &cart, &DeliveryPolicy::default());
        assert_eq!(order.subtotal, Money::from_tenge(4500));
        assert_eq!(order.delivery_fee, Money::from_tenge(500));
        assert_eq!(order.total, Money::from_tenge(5000));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.order_type.comment.as_deref(), Some("домофон 12"));
        assert_eq!(
            order.order_type.address.as_deref(),
            Some("Астана, ул. Кенесары 40")
        );
        assert!(order.order_number.is_none());
        assert!(Uuid::parse_str(&order.id).is_ok());
    }

    #[test]
    fn test_pickup_order_drops_address() {
        let mut form = delivery_form();
        form.fulfillment = FulfillmentType::Pickup;

        let order = build_order(&form, &cart_worth(3000), &DeliveryPolicy::default());
        assert!(order.order_type.address.is_none());
        assert!(order.delivery_fee.is_zero());
    }

    #[test]
    fn test_rejection_leaves_cart_untouched() {
        let mut store = CartStore::new();
        store.add_quantity(&product("1", 500), 2);
        let before = store.snapshot();

        let mut flow = CheckoutFlow::new();
        let err = flow
            .begin(&delivery_form(), store.cart(), &DeliveryPolicy::default(), &slots())
            .unwrap_err();

        assert!(matches!(err, CoreError::CheckoutRejected(_)));
        assert_eq!(flow.phase(), CheckoutPhase::Rejected);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_success_clears_cart_once() {
        let counter = ClearCounter::default();
        let mut store = CartStore::new();
        store.subscribe(Box::new(counter.clone()));
        store.add_quantity(&product("1", 1000), 3);

        let mut flow = CheckoutFlow::new();
        let order = flow
            .begin(&delivery_form(), store.cart(), &DeliveryPolicy::default(), &slots())
            .unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::Submitting);
        assert_eq!(order.total, Money::from_tenge(3500));
        assert_eq!(store.item_count(), 3);

        flow.complete(&mut store).unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::Succeeded);
        assert!(store.is_empty());
        assert_eq!(*counter.0.lock().unwrap(), 1);

        // A second completion is refused and does not clear again.
        assert!(matches!(flow.complete(&mut store), Err(CoreError::NotSubmitting)));
        assert_eq!(*counter.0.lock().unwrap(), 1);
    }

    #[test]
    fn test_double_submit_rejected() {
        let cart = cart_worth(3000);
        let mut flow = CheckoutFlow::new();

        flow.begin(&delivery_form(), &cart, &DeliveryPolicy::default(), &[])
            .unwrap();
        let err = flow
            .begin(&delivery_form(), &cart, &DeliveryPolicy::default(), &[])
            .unwrap_err();
        assert!(matches!(err, CoreError::AlreadySubmitting));
        assert!(flow.is_submitting());
    }

    #[test]
    fn test_abort_returns_to_input() {
        let mut store = CartStore::new();
        store.add_item(&product("1", 3000));

        let mut flow = CheckoutFlow::new();
        flow.begin(&delivery_form(), store.cart(), &DeliveryPolicy::default(), &[])
            .unwrap();
        flow.abort().unwrap();

        assert_eq!(flow.phase(), CheckoutPhase::CollectingInput);
        assert_eq!(store.item_count(), 1);
        assert!(flow.abort().is_err());
    }
}
