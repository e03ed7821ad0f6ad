//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── Input masks (phone), disabled buttons                             │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront commands (Rust)                                   │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout (checkout.rs)                                       │
//! │  └── Cross-field rules: address vs fulfillment, minimum order          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted search query, in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Longest accepted order comment, in characters.
pub const MAX_COMMENT_LEN: usize = 500;

/// Phone numbers must carry at least this many digits (+7 XXX XXX XX XX).
pub const MIN_PHONE_DIGITS: usize = 10;

/// And at most this many (E.164 limit).
pub const MAX_PHONE_DIGITS: usize = 15;

/// Largest quantity of a single product in one cart line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (no search)
/// - Maximum 100 characters after trimming
///
/// ## Returns
/// The trimmed query string.
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_search_query;
///
/// assert_eq!(validate_search_query("  хлеб ").unwrap(), "хлеб");
/// assert!(validate_search_query(&"я".repeat(101)).is_err());
/// ```
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - Must not be blank
/// - Only digits, spaces, `+`, `-`, `(`, `)` allowed
/// - 10 to 15 digits
///
/// ## Returns
/// The trimmed phone as entered.
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_phone;
///
/// assert!(validate_phone("+7 (701) 123 45 67").is_ok());
/// assert!(validate_phone("   ").is_err());
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, +, -, and parentheses".to_string(),
        });
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!(
                "must have between {} and {} digits",
                MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
            ),
        });
    }

    Ok(phone.to_string())
}

/// Validates an optional order comment. Blank comments become `None`.
pub fn validate_comment(comment: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(comment) = comment.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    if comment.chars().count() > MAX_COMMENT_LEN {
        return Err(ValidationError::TooLong {
            field: "comment".to_string(),
            max: MAX_COMMENT_LEN,
        });
    }

    Ok(Some(comment.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`] (999)
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates that `slot` is one of the offered time slot ids.
pub fn validate_time_slot(slot: &str, offered: &[String]) -> ValidationResult<()> {
    if offered.iter().any(|s| s == slot) {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: "time slot".to_string(),
        allowed: offered.to_vec(),
    })
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a single catalog product.
///
/// ## Rules
/// - `id` and `name` must not be blank
/// - `price` and `old_price` must be non-negative
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: format!("name of product {}", product.id),
        });
    }

    validate_price(product.price)?;
    if let Some(old) = product.old_price {
        validate_price(old)?;
    }

    Ok(())
}

/// Validates a full catalog: every product valid, ids unique, every
/// product category known.
pub fn validate_catalog(products: &[Product], categories: &[Category]) -> ValidationResult<()> {
    let mut seen = std::collections::HashSet::new();

    for product in products {
        validate_product(product)?;

        if !seen.insert(product.id.as_str()) {
            return Err(ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: format!("duplicate id '{}'", product.id),
            });
        }

        if !categories.iter().any(|c| c.id == product.category) {
            return Err(ValidationError::NotAllowed {
                field: format!("category of product {}", product.id),
                allowed: categories.iter().map(|c| c.id.clone()).collect(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            name_kz: None,
            icon: "🛒".to_string(),
            product_count: 0,
        }
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("").unwrap(), "");
        assert_eq!(validate_search_query("  молоко  ").unwrap(), "молоко");
        // Limit counts characters, not bytes.
        assert!(validate_search_query(&"я".repeat(100)).is_ok());
        assert!(validate_search_query(&"я".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone(" +7 701 123 45 67 ").unwrap(), "+7 701 123 45 67");
        assert!(validate_phone("87011234567").is_ok());

        assert!(matches!(
            validate_phone(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_phone("call me"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_phone("123").is_err());
        assert!(validate_phone(&"1".repeat(16)).is_err());
    }

    #[test]
    fn test_validate_comment() {
        assert_eq!(validate_comment(None).unwrap(), None);
        assert_eq!(validate_comment(Some("   ")).unwrap(), None);
        assert_eq!(
            validate_comment(Some(" домофон 42 ")).unwrap(),
            Some("домофон 42".to_string())
        );
        assert!(validate_comment(Some(&"x".repeat(501))).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_time_slot() {
        let offered = vec!["asap".to_string(), "12-14".to_string()];
        assert!(validate_time_slot("asap", &offered).is_ok());
        assert!(validate_time_slot("02-04", &offered).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_tenge(320)).is_ok());
        assert!(validate_price(Money::from_tenge(-1)).is_err());
    }

    #[test]
    fn test_validate_catalog() {
        let cats = vec![category("bakery")];
        let bread = Product::new("1", "Хлеб", Money::from_tenge(320), "bakery");

        assert!(validate_catalog(&[bread.clone()], &cats).is_ok());

        // Duplicate id
        assert!(validate_catalog(&[bread.clone(), bread.clone()], &cats).is_err());

        // Unknown category
        let stray = Product::new("2", "Рыба", Money::from_tenge(900), "fish");
        assert!(validate_catalog(&[bread.clone(), stray], &cats).is_err());

        // Blank name
        let blank = Product::new("3", " ", Money::from_tenge(1), "bakery");
        assert!(validate_catalog(&[blank], &cats).is_err());
    }
}
