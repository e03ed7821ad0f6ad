//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Whole Currency Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES IN THE STOREFRONT                                               │
//! │                                                                         │
//! │  Tenge prices are quoted in whole units:                                │
//! │    Хлеб белый нарезной   320₸                                           │
//! │    Молоко 2.5%           650₸                                           │
//! │                                                                         │
//! │  There is no minor unit to round, so every price, line total,          │
//! │  delivery fee and grand total is an exact i64.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let price = Money::from_tenge(320);
//! let line = price * 2;
//! let total = line + Money::from_tenge(500);
//! assert_eq!(total.tenge(), 1140);
//! assert_eq!(total.to_string(), "1 140₸");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Symbol used by `Display`.
pub const CURRENCY_SYMBOL: &str = "₸";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole tenge.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as "remaining until free delivery"
///   can be computed without underflow checks at every call site
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Newtype serde**: serializes as a bare number, like the catalog JSON
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartItem.line_total ──► Cart subtotal
///                                               │
///                       DeliveryPolicy ◄────────┘
///                            │
///                            ▼
///               delivery fee + grand total ──► Order
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole tenge.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let fee = Money::from_tenge(500);
    /// assert_eq!(fee.tenge(), 500);
    /// ```
    #[inline]
    pub const fn from_tenge(tenge: i64) -> Self {
        Money(tenge)
    }

    /// Returns the value in whole tenge.
    #[inline]
    pub const fn tenge(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let unit_price = Money::from_tenge(650);
    /// assert_eq!(unit_price.multiply_quantity(3).tenge(), 1950);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `self - other`, floored at zero.
    ///
    /// Used for "how much more until X" hints, which never go negative.
    #[inline]
    pub const fn saturating_gap(&self, other: Money) -> Money {
        let gap = self.0 - other.0;
        if gap > 0 {
            Money(gap)
        } else {
            Money(0)
        }
    }

    /// Formats as space-grouped digits followed by `symbol`.
    ///
    /// ```rust
    /// use bazaar_core::Money;
    ///
    /// assert_eq!(Money::from_tenge(12500).format_with("₸"), "12 500₸");
    /// assert_eq!(Money::from_tenge(-500).format_with(" KZT"), "-500 KZT");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + symbol.len() + 1);
        if self.0 < 0 {
            out.push('-');
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(' ');
            }
            out.push(ch);
        }
        out.push_str(symbol);
        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats with space-grouped thousands and a tenge sign: `12 345₸`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(CURRENCY_SYMBOL))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
