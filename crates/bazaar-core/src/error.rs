//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError          - General domain errors                        │
//! │  ├── ValidationError    - Input validation failures                    │
//! │  └── CheckoutRejection  - One or more CheckoutIssue reasons            │
//! │                                                                         │
//! │  bazaar-storefront errors (separate crate)                             │
//! │  ├── StorefrontError    - Config and submission failures               │
//! │  └── ApiError           - What the presentation layer sees             │
//! │                                                                         │
//! │  Flow: CheckoutIssue → CheckoutRejection → CoreError → ApiError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operating on a product that is not in the cart is not an error at all;
//! those calls are silent no-ops and never reach this module.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is not in stock.
    ///
    /// ## When This Occurs
    /// The product card hides the add button for these, so this only fires
    /// when a stale screen sends an add for a product that sold out.
    #[error("{name} is out of stock")]
    OutOfStock { product_id: String, name: String },

    /// Catalog data could not be parsed.
    #[error("Invalid catalog data: {0}")]
    InvalidCatalog(String),

    /// Checkout form or cart failed validation.
    #[error("Checkout rejected: {0}")]
    CheckoutRejected(#[from] CheckoutRejection),

    /// Submit pressed while a submission is still in flight.
    #[error("Order is already being submitted")]
    AlreadySubmitting,

    /// Completion or abort reported with no submission in flight.
    #[error("No order submission is in progress")]
    NotSubmitting,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Checkout Issues
// =============================================================================

/// A single reason a checkout cannot be submitted.
///
/// Each variant maps to one message the shopper can act on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutIssue {
    #[error("Корзина пуста")]
    EmptyCart,

    #[error("Укажите адрес доставки")]
    AddressRequired,

    #[error("Адрес находится вне зоны доставки")]
    OutsideDeliveryZone { address: String },

    #[error("Укажите номер телефона")]
    PhoneRequired,

    #[error("Минимальная сумма заказа: {minimum}")]
    BelowMinimumOrder { minimum: Money, subtotal: Money },

    #[error("Неизвестный интервал времени: {slot}")]
    UnknownTimeSlot { slot: String },

    #[error("{0}")]
    Invalid(ValidationError),
}

impl CheckoutIssue {
    /// Stable machine-readable code for the frontend.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutIssue::EmptyCart => "EMPTY_CART",
            CheckoutIssue::AddressRequired => "ADDRESS_REQUIRED",
            CheckoutIssue::OutsideDeliveryZone { .. } => "OUTSIDE_DELIVERY_ZONE",
            CheckoutIssue::PhoneRequired => "PHONE_REQUIRED",
            CheckoutIssue::BelowMinimumOrder { .. } => "BELOW_MINIMUM_ORDER",
            CheckoutIssue::UnknownTimeSlot { .. } => "UNKNOWN_TIME_SLOT",
            CheckoutIssue::Invalid(_) => "INVALID_FIELD",
        }
    }
}

/// Every issue found while validating a checkout, in check order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", join_issues(.issues))]
pub struct CheckoutRejection {
    pub issues: Vec<CheckoutIssue>,
}

impl CheckoutRejection {
    /// True if `issue` is among the reasons (compared by variant).
    pub fn contains(&self, issue: &CheckoutIssue) -> bool {
        self.issues
            .iter()
            .any(|i| std::mem::discriminant(i) == std::mem::discriminant(issue))
    }
}

fn join_issues(issues: &[CheckoutIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OutOfStock {
            product_id: "6".to_string(),
            name: "Кефир 1%".to_string(),
        };
        assert_eq!(err.to_string(), "Кефир 1% is out of stock");

        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");
    }

    #[test]
    fn test_rejection_joins_issues() {
        let rejection = CheckoutRejection {
            issues: vec![
                CheckoutIssue::AddressRequired,
                CheckoutIssue::BelowMinimumOrder {
                    minimum: Money::from_tenge(2000),
                    subtotal: Money::from_tenge(1500),
                },
            ],
        };
        assert_eq!(
            rejection.to_string(),
            "Укажите адрес доставки; Минимальная сумма заказа: 2 000₸"
        );
        assert!(rejection.contains(&CheckoutIssue::AddressRequired));
        assert!(!rejection.contains(&CheckoutIssue::PhoneRequired));
    }

    #[test]
    fn test_rejection_converts_to_core_error() {
        let rejection = CheckoutRejection {
            issues: vec![CheckoutIssue::EmptyCart],
        };
        let core_err: CoreError = rejection.into();
        assert!(matches!(core_err, CoreError::CheckoutRejected(_)));
    }

    #[test]
    fn test_issue_codes() {
        assert_eq!(CheckoutIssue::PhoneRequired.code(), "PHONE_REQUIRED");
        assert_eq!(
            CheckoutIssue::OutsideDeliveryZone {
                address: "x".to_string()
            }
            .code(),
            "OUTSIDE_DELIVERY_ZONE"
        );
    }
}
