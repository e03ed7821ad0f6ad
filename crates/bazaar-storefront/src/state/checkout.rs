//! # Checkout State
//!
//! The checkout phase machine and the submitter orders are handed to.

use std::sync::{Arc, Mutex};

use bazaar_core::{CheckoutFlow, CheckoutPhase};
use tracing::warn;

use super::lock;
use crate::submit::OrderSubmitter;

pub struct CheckoutState {
    flow: Mutex<CheckoutFlow>,
    submitter: Arc<dyn OrderSubmitter>,
}

impl std::fmt::Debug for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutState")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl CheckoutState {
    pub fn new(submitter: Arc<dyn OrderSubmitter>) -> Self {
        CheckoutState {
            flow: Mutex::new(CheckoutFlow::new()),
            submitter,
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        lock(&self.flow).phase()
    }

    /// Runs `f` with exclusive access to the checkout flow.
    ///
    /// Never hold this across an `.await`; the guard is not `Send`.
    pub fn with_flow<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutFlow) -> R,
    {
        let mut flow = lock(&self.flow);
        f(&mut flow)
    }

    pub fn submitter(&self) -> Arc<dyn OrderSubmitter> {
        Arc::clone(&self.submitter)
    }

    /// Arms a guard that returns the flow to input collection if the
    /// submission is dropped before it completes or aborts.
    pub(crate) fn guard_submission(&self) -> SubmissionGuard<'_> {
        SubmissionGuard {
            checkout: self,
            armed: true,
        }
    }
}

/// Aborts an in-flight submission on drop unless disarmed.
///
/// A cancelled `place_order` future (client disconnect, timeout) would
/// otherwise leave the flow in `Submitting` and reject every later order.
pub(crate) struct SubmissionGuard<'a> {
    checkout: &'a CheckoutState,
    armed: bool,
}

impl SubmissionGuard<'_> {
    /// The caller settles the flow itself from here on.
    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.checkout.with_flow(|flow| {
            if flow.is_submitting() {
                warn!("Order submission cancelled; checkout reopened");
                let _ = flow.abort();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::ImmediateSubmitter;

    #[test]
    fn test_starts_collecting_input() {
        let state = CheckoutState::new(Arc::new(ImmediateSubmitter));
        assert_eq!(state.phase(), CheckoutPhase::CollectingInput);

        state.with_flow(|flow| flow.reset());
        assert_eq!(state.phase(), CheckoutPhase::CollectingInput);
    }

    fn start_submission(state: &CheckoutState) {
        use bazaar_core::checkout::CheckoutForm;
        use bazaar_core::{CartStore, DeliveryAddress, DeliveryPolicy, Money, Product};

        let mut store = CartStore::new();
        store.add_item(&Product::new("1", "Молоко", Money::from_tenge(5000), "dairy"));
        let form = CheckoutForm {
            address: Some(DeliveryAddress::new("Астана, ул. Кенесары 40", true)),
            phone: "+7 701 555 12 34".to_string(),
            ..CheckoutForm::default()
        };
        state
            .with_flow(|flow| flow.begin(&form, store.cart(), &DeliveryPolicy::default(), &[]))
            .unwrap();
        assert_eq!(state.phase(), CheckoutPhase::Submitting);
    }

    #[test]
    fn test_dropped_guard_reopens_checkout() {
        let state = CheckoutState::new(Arc::new(ImmediateSubmitter));
        start_submission(&state);

        drop(state.guard_submission());
        assert_eq!(state.phase(), CheckoutPhase::CollectingInput);
    }

    #[test]
    fn test_disarmed_guard_leaves_flow() {
        let state = CheckoutState::new(Arc::new(ImmediateSubmitter));
        start_submission(&state);

        state.guard_submission().disarm();
        assert_eq!(state.phase(), CheckoutPhase::Submitting);
    }
}
