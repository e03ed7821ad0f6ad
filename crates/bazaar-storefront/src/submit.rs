//! # Order Submission
//!
//! The one asynchronous step of checkout: handing a validated order to
//! whatever accepts it.
//!
//! ## Submitters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  trait OrderSubmitter                                                   │
//! │    async fn submit(&Order) -> Result<OrderReceipt, SubmitError>         │
//! │         │                                                               │
//! │         ├── SimulatedSubmitter   sleeps (default 1500 ms), then accepts │
//! │         └── ImmediateSubmitter   accepts at once (tests, demos)         │
//! │                                                                         │
//! │  No retries. A failed submit leaves the cart as it was.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use bazaar_core::Order;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

/// What the store hands back once it has accepted an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderReceipt {
    pub order_id: String,
    /// Six-digit number read out to the shopper ("Заказ #482913").
    pub order_number: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The store refused the order.
    #[error("Order rejected by store: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Accepts validated orders.
#[async_trait]
pub trait OrderSubmitter: Send + Sync + 'static {
    async fn submit(&self, order: &Order) -> Result<OrderReceipt, SubmitError>;
}

/// Random six-digit order number, 100000..=999999.
pub fn generate_order_number() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    let random = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    format!("{}", 100_000 + random % 900_000)
}

fn accept(order: &Order) -> OrderReceipt {
    OrderReceipt {
        order_id: order.id.clone(),
        order_number: generate_order_number(),
    }
}

// =============================================================================
// Simulated Submitter
// =============================================================================

/// Stands in for the network round trip with a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    /// Delay used when nothing is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new(delay: Duration) -> Self {
        SimulatedSubmitter { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        SimulatedSubmitter::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedSubmitter {
    async fn submit(&self, order: &Order) -> Result<OrderReceipt, SubmitError> {
        debug!(order_id = %order.id, delay_ms = self.delay.as_millis() as u64, "simulating submission");
        tokio::time::sleep(self.delay).await;
        Ok(accept(order))
    }
}

// =============================================================================
// Immediate Submitter
// =============================================================================

/// Accepts every order without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSubmitter;

#[async_trait]
impl OrderSubmitter for ImmediateSubmitter {
    async fn submit(&self, order: &Order) -> Result<OrderReceipt, SubmitError> {
        Ok(accept(order))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
