//! # Money Module
//!
//! Provides the `Money` type for handling euro amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The CMS stores prices as decimals: "12.95"                             │
//! │  As f64:  12.95 * 3 = 38.849999999999994  ❌                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "12.95" ──parse──► 1295 cents × 3 = 3885 cents = € 38,85            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use etalage_core::money::Money;
//!
//! let price = Money::parse_decimal("12.95").unwrap();
//! assert_eq!(price.cents(), 1295);
//!
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.to_string(), "€ 38,85");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in euro cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic results may go negative; prices never do
///   (see [`crate::validation::validate_price_cents`])
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare integer** so the front-end formats nothing itself
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► LineItem.unit_price ──► LineItem.line_total ──► Cart.total
///                        │
///                        └──► Displayed as "€ 12,95" by the cart view
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use etalage_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // € 10,99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal price as delivered by the CMS.
    ///
    /// ## Accepted Input
    /// - `"10"`, `"10.5"`, `"10.50"`, `"10,50"` (Dutch decimal comma)
    /// - An optional leading `€` and surrounding whitespace
    ///
    /// Negative amounts, thousands separators and more than two decimals are
    /// rejected: a catalog price is never any of those.
    ///
    /// ## Example
    /// ```rust
    /// use etalage_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("€ 4,95").unwrap().cents(), 495);
    /// assert!(Money::parse_decimal("4.955").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('€').unwrap_or(trimmed).trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let (whole, fraction) = match trimmed.find(|c: char| c == '.' || c == ',') {
            Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
            None => (trimmed, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a non-negative decimal amount"));
        }

        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimals allowed"));
        }

        let euros: i64 = whole
            .parse()
            .map_err(|_| invalid("amount is too large"))?;

        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid("bad decimals"))?,
        };

        euros
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(|| invalid("amount is too large"))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-euro portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Saturates at the i64 bounds instead of overflowing, so a line total
    /// is always defined.
    ///
    /// ## Example
    /// ```rust
    /// use etalage_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // € 2,99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Dutch notation: euro sign, space, `.` for thousands, `,` for decimals.
///
/// ```text
/// 1099      → € 10,99
/// 123450    → € 1.234,50
/// -550      → -€ 5,50
/// ```
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let euros = (self.0 / 100).unsigned_abs().to_string();

        let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
        for (i, digit) in euros.chars().enumerate() {
            if i > 0 && (euros.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        write!(f, "{}€ {},{:02}", sign, grouped, self.cents_part())
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.euros(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display_dutch_notation() {
        assert_eq!(Money::from_cents(1099).to_string(), "€ 10,99");
        assert_eq!(Money::from_cents(500).to_string(), "€ 5,00");
        assert_eq!(Money::from_cents(0).to_string(), "€ 0,00");
        assert_eq!(Money::from_cents(-550).to_string(), "-€ 5,50");
        assert_eq!(Money::from_cents(123450).to_string(), "€ 1.234,50");
        assert_eq!(Money::from_cents(100_000_000).to_string(), "€ 1.000.000,00");
        assert_eq!(Money::from_cents(99_999).to_string(), "€ 999,99");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse_decimal("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse_decimal("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse_decimal("10,05").unwrap().cents(), 1005);
        assert_eq!(Money::parse_decimal(" € 0,99 ").unwrap().cents(), 99);
        assert_eq!(Money::parse_decimal("0").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_decimal_rejects_bad_input() {
        assert!(matches!(
            Money::parse_decimal(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(Money::parse_decimal("-1.00").is_err());
        assert!(Money::parse_decimal("1.234,50").is_err());
        assert!(Money::parse_decimal("1.999").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal(".50").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let expensive = Money::from_cents(i64::MAX / 2);
        assert_eq!(expensive.multiply_quantity(3).cents(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(100), Money::from_cents(250)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 350);

        let empty: Vec<Money> = Vec::new();
        assert!(empty.into_iter().sum::<Money>().is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }
}
