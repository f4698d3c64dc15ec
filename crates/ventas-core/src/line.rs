//! # Line Totals
//!
//! `quantity × unit price × (1 − discount/100)`, rounded once to cents.
//!
//! ## Degrade, Don't Fail
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User is typing in the "Cantidad" field:                               │
//! │                                                                         │
//! │   ""    → quantity invalid   → line total 0.00                          │
//! │   "1"   → 1 × 100 × 0.95     → 95.00                                    │
//! │   "10"  → 10 × 100 × 0.95    → 950.00                                   │
//! │                                                                         │
//! │  Discount "150" is clamped to 100 → 0.00                               │
//! │  Discount "-20" is clamped to 0   → full price                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Required-field and range checks live in [`crate::validation`] and run on
//! save, never here.

use rust_decimal::Decimal;

use crate::discount::clamp_discount;
use crate::input::parse_number;
use crate::money::Money;

/// Computes a line total.
///
/// Returns zero when `quantity <= 0`, `unit_price < 0`, or the product
/// overflows.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use ventas_core::line::line_total;
///
/// let total = line_total(Decimal::from(10), Decimal::from(100), Decimal::from(5));
/// assert_eq!(total.to_string(), "950.00");
/// ```
pub fn line_total(quantity: Decimal, unit_price: Decimal, discount_percent: Decimal) -> Money {
    if quantity <= Decimal::ZERO || unit_price < Decimal::ZERO {
        return Money::zero();
    }

    let factor = Decimal::ONE - clamp_discount(discount_percent) / Decimal::ONE_HUNDRED;

    quantity
        .checked_mul(unit_price)
        .and_then(|gross| gross.checked_mul(factor))
        .map(Money::from_decimal)
        .unwrap_or_default()
}

/// Computes a line total straight from raw form text.
///
/// Non-numeric quantity or price contributes zero. A non-numeric discount
/// counts as no discount.
pub fn line_total_from_input(quantity: &str, unit_price: &str, discount_percent: &str) -> Money {
    match (parse_number(quantity), parse_number(unit_price)) {
        (Some(q), Some(p)) => line_total(q, p, parse_number(discount_percent).unwrap_or_default()),
        _ => Money::zero(),
    }
}
