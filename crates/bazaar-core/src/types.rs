//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id (UUID)      │       │
//! │  │  name / nameKz  │   │  name           │   │  items          │       │
//! │  │  price          │   │  icon           │   │  total          │       │
//! │  │  oldPrice       │   │  productCount   │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ FulfillmentType │   │  PaymentMethod  │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Delivery       │   │  KaspiPay       │   │  Pending        │       │
//! │  │  Pickup         │   │  KaspiQr        │   │  Preparing ...  │       │
//! │  └─────────────────┘   │  Cash           │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog records (`Product`, `Category`) are owned by the catalog data
//! source and never mutated here. Field names serialize in camelCase so the
//! same JSON feeds both this crate and the web frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartItem;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: String,

    /// Display name (Russian).
    pub name: String,

    /// Secondary-language display name (Kazakh).
    #[serde(default)]
    pub name_kz: Option<String>,

    /// Current unit price. This is what the shopper pays.
    pub price: Money,

    /// Price before discount, shown struck through.
    #[serde(default)]
    pub old_price: Option<Money>,

    /// Category identifier.
    pub category: String,

    /// Weight label, e.g. "500 г".
    #[serde(default)]
    pub weight: Option<String>,

    /// Unit label, e.g. "шт" or "кг".
    #[serde(default)]
    pub unit: Option<String>,

    pub in_stock: bool,

    #[serde(default)]
    pub is_hit: bool,

    #[serde(default)]
    pub is_sale: bool,

    #[serde(default)]
    pub is_new: bool,

    #[serde(default)]
    pub description: Option<String>,

    /// Image URL for the product card.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Discount relative to `old_price`, rounded down to a whole percent.
    ///
    /// Returns `None` when there is no old price or it is not higher than
    /// the current price.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::{Money, Product};
    ///
    /// let mut bread = Product::new("1", "Хлеб", Money::from_tenge(240), "bakery");
    /// bread.old_price = Some(Money::from_tenge(320));
    /// assert_eq!(bread.discount_percent(), Some(25));
    /// ```
    pub fn discount_percent(&self) -> Option<u8> {
        let old = self.old_price?;
        if old <= self.price || !old.is_positive() {
            return None;
        }
        let pct = (old - self.price).tenge() * 100 / old.tenge();
        u8::try_from(pct).ok()
    }

    /// True when the product should appear under "hits" (popular or on sale).
    #[inline]
    pub fn is_promoted(&self) -> bool {
        self.is_hit || self.is_sale
    }

    /// Case-insensitive substring match on the primary or secondary name.
    ///
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .name_kz
                .as_deref()
                .is_some_and(|kz| kz.to_lowercase().contains(needle))
    }

    /// Minimal in-stock product with all optional fields unset.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            name_kz: None,
            price,
            old_price: None,
            category: category.into(),
            weight: None,
            unit: None,
            in_stock: true,
            is_hit: false,
            is_sale: false,
            is_new: false,
            description: None,
            image: None,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A catalog category.
///
/// `product_count` is informational and is not checked against the
/// actual product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_kz: Option<String>,
    /// Emoji glyph shown on the category tile.
    pub icon: String,
    #[serde(default)]
    pub product_count: u32,
}

// =============================================================================
// Fulfillment
// =============================================================================

/// How the shopper receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FulfillmentType {
    /// Courier delivery to an address inside the delivery zone.
    #[default]
    Delivery,
    /// Shopper collects the order at the store.
    Pickup,
}

impl FulfillmentType {
    pub fn label(&self) -> &'static str {
        match self {
            FulfillmentType::Delivery => "Доставка",
            FulfillmentType::Pickup => "Самовывоз",
        }
    }
}

/// Delivery address as resolved by the address/map collaborator.
///
/// Zone membership is decided outside this crate; we only carry the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeliveryAddress {
    pub text: String,
    pub in_zone: bool,
}

impl DeliveryAddress {
    pub fn new(text: impl Into<String>, in_zone: bool) -> Self {
        DeliveryAddress {
            text: text.into(),
            in_zone,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum PaymentMethod {
    /// Kaspi Pay in-app payment.
    #[default]
    KaspiPay,
    /// Kaspi QR scanned on receipt.
    KaspiQr,
    /// Cash to the courier or at pickup.
    Cash,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::KaspiPay => "Kaspi Pay",
            PaymentMethod::KaspiQr => "Kaspi QR",
            PaymentMethod::Cash => "Наличные",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kaspi-pay" | "kaspi_pay" | "kaspipay" => Ok(PaymentMethod::KaspiPay),
            "kaspi-qr" | "kaspi_qr" | "kaspiqr" => Ok(PaymentMethod::KaspiQr),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(format!(
                "Unknown payment method: '{}'. Valid options: kaspi-pay, kaspi-qr, cash",
                other
            )),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Status of a placed order.
///
/// Only `Pending` is ever produced by checkout; the remaining states are
/// assigned by the store after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Shopper-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Принят",
            OrderStatus::Preparing => "Собирается",
            OrderStatus::Ready => "Готов",
            OrderStatus::Delivered => "Доставлен",
            OrderStatus::Cancelled => "Отменен",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "📋",
            OrderStatus::Preparing => "📦",
            OrderStatus::Ready => "✅",
            OrderStatus::Delivered => "🎉",
            OrderStatus::Cancelled => "❌",
        }
    }

    /// Orders the shopper is still waiting on.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready
        )
    }
}

// =============================================================================
// Order
// =============================================================================

/// How and when the order is handed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderType {
    #[serde(rename = "type")]
    pub kind: FulfillmentType,
    /// Present for deliveries only.
    pub address: Option<String>,
    /// Time slot id, e.g. "asap" or "12-14".
    pub time_slot: String,
    pub comment: Option<String>,
}

/// A submitted order.
///
/// Snapshot pattern: items are frozen copies of the cart at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// UUID v4.
    pub id: String,
    /// Short number shown to the shopper; assigned once the store accepts
    /// the order.
    #[serde(default)]
    pub order_number: Option<String>,
    pub items: Vec<CartItem>,
    /// Sum of line totals.
    pub subtotal: Money,
    pub delivery_fee: Money,
    /// Subtotal plus delivery fee.
    pub total: Money,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub contact_phone: String,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
