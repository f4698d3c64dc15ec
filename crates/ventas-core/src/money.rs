//! # Money Module
//!
//! Provides the `Money` type for derived monetary values (line totals,
//! subtotals, ARS conversions) and the single rounding rule every
//! calculation goes through.
//!
//! ## Decimals In, Cents Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INPUTS (form fields)            OUTPUTS (what the UI shows / sends)    │
//! │                                                                         │
//! │  quantity      2.5  ─┐                                                  │
//! │  unit price  19.99  ─┼──► Decimal math ──► round2 ──► Money (cents)    │
//! │  discount %     5   ─┘                    half-up      4748            │
//! │                                                                         │
//! │  Quantities may be fractional (kg, m), so inputs stay Decimal.          │
//! │  Every derived amount is rounded exactly once to 2 places and then      │
//! │  lives as integer cents: 0.1 + 0.2 is always 0.30 here.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use ventas_core::money::Money;
//!
//! let total = Money::from_decimal(Decimal::new(949995, 3)); // 949.995
//! assert_eq!(total.cents(), 95000);
//! assert_eq!(total.to_string(), "950.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Number of decimal places every derived amount is rounded to.
pub const DECIMAL_PLACES: u32 = 2;

/// Rounds a decimal to two places, half away from zero.
///
/// This mirrors fixed-point formatting (`toFixed(2)`) for the non-negative
/// amounts documents deal with: `0.125 → 0.13`, `0.124 → 0.12`.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use ventas_core::money::round2;
///
/// assert_eq!(round2(Decimal::new(125, 3)), Decimal::new(13, 2));
/// ```
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (hundredths of the document currency).
///
/// ## Design Decisions
/// - **i64 (signed)**: net-after-deductions can go negative on odd inputs
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating arithmetic**: sums never panic, they pin at the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding half-up to
    /// two places.
    ///
    /// Amounts that do not fit in i64 cents degrade to zero instead of
    /// panicking.
    pub fn from_decimal(amount: Decimal) -> Self {
        round2(amount)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .unwrap_or_default()
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a two-place decimal.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use ventas_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(100300).to_decimal(), Decimal::new(100300, 2));
    /// ```
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, DECIMAL_PLACES)
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Fixed-point display with two decimals, no currency symbol.
///
/// ## Note
/// The same value is shown as USD or ARS depending on the column, so the
/// symbol is the frontend's concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(dec("0.125")), dec("0.13"));
        assert_eq!(round2(dec("0.124")), dec("0.12"));
        assert_eq!(round2(dec("2.675")), dec("2.68"));
        assert_eq!(round2(dec("1003")), dec("1003"));
    }

    #[test]
    fn test_from_decimal_rounds_once() {
        assert_eq!(Money::from_decimal(dec("950")).cents(), 95000);
        assert_eq!(Money::from_decimal(dec("10.005")).cents(), 1001);
        assert_eq!(Money::from_decimal(dec("10.0049")).cents(), 1000);
    }

    #[test]
    fn test_from_decimal_overflow_degrades_to_zero() {
        assert_eq!(Money::from_decimal(Decimal::MAX), Money::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(100300).to_string(), "1003.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(47500);
        let b = Money::from_cents(52800);
        assert_eq!((a + b).cents(), 100300);
        assert_eq!((b - a).cents(), 5300);

        let total: Money = vec![a, b, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total.cents(), 100301);
    }

    #[test]
    fn test_saturating_add_never_panics() {
        let big = Money::from_cents(i64::MAX);
        assert_eq!((big + Money::from_cents(1)).cents(), i64::MAX);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(95000).to_decimal(), dec("950.00"));
    }
}
