//! # Discount Tiers
//!
//! Quantity-based default discount suggested when a catalog product is
//! picked or its quantity changes.
//!
//! ## Tier Table
//! ```text
//! ┌──────────────────────┬────────────┐
//! │  Quantity            │ Discount % │
//! ├──────────────────────┼────────────┤
//! │  q ≥ 50              │     12     │
//! │  25 ≤ q < 50         │     10     │
//! │  10 ≤ q < 25         │      5     │
//! │   1 ≤ q < 10         │      0     │
//! │  q < 1, invalid      │      0     │
//! └──────────────────────┴────────────┘
//! ```
//!
//! The suggestion is only a default. The editor keeps whatever the user
//! typed into the discount field once they touch it.

use rust_decimal::Decimal;

/// Breakpoints as `(minimum quantity, discount percent)`, highest first.
pub const DISCOUNT_TIERS: [(i64, i64); 4] = [(50, 12), (25, 10), (10, 5), (1, 0)];

/// Returns the default discount percentage for a quantity.
///
/// The highest qualifying tier wins. Quantities at or below zero get no
/// discount.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use ventas_core::discount::resolve_discount_tier;
///
/// assert_eq!(resolve_discount_tier(Decimal::from(60)), Decimal::from(12));
/// assert_eq!(resolve_discount_tier(Decimal::from(10)), Decimal::from(5));
/// assert_eq!(resolve_discount_tier(Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn resolve_discount_tier(quantity: Decimal) -> Decimal {
    if quantity <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    DISCOUNT_TIERS
        .iter()
        .find(|(min, _)| quantity >= Decimal::from(*min))
        .map(|(_, pct)| Decimal::from(*pct))
        .unwrap_or(Decimal::ZERO)
}

/// Clamps a discount percentage into `[0, 100]`.
///
/// Out-of-range values are pulled to the nearest bound, not rejected.
#[inline]
pub fn clamp_discount(discount_percent: Decimal) -> Decimal {
    discount_percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{number_or_zero, number_or_zero_f64};

    fn tier(q: &str) -> Decimal {
        resolve_discount_tier(q.parse().unwrap())
    }

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(tier("1"), Decimal::ZERO);
        assert_eq!(tier("9.99"), Decimal::ZERO);
        assert_eq!(tier("10"), Decimal::from(5));
        assert_eq!(tier("24"), Decimal::from(5));
        assert_eq!(tier("25"), Decimal::from(10));
        assert_eq!(tier("49.5"), Decimal::from(10));
        assert_eq!(tier("50"), Decimal::from(12));
        assert_eq!(tier("100000"), Decimal::from(12));
    }

    #[test]
    fn test_tier_invalid_quantities() {
        assert_eq!(tier("0"), Decimal::ZERO);
        assert_eq!(tier("-60"), Decimal::ZERO);
        assert_eq!(tier("0.5"), Decimal::ZERO);
        assert_eq!(resolve_discount_tier(number_or_zero_f64(f64::NAN)), Decimal::ZERO);
        assert_eq!(resolve_discount_tier(number_or_zero("abc")), Decimal::ZERO);
    }

    #[test]
    fn test_tier_is_monotonic_and_in_range() {
        let allowed = [0, 5, 10, 12].map(Decimal::from);
        let mut previous = Decimal::ZERO;
        for q in 1..=120 {
            let d = resolve_discount_tier(Decimal::from(q));
            assert!(allowed.contains(&d), "unexpected tier {} for {}", d, q);
            assert!(d >= previous, "tier dropped at quantity {}", q);
            previous = d;
        }
    }

    #[test]
    fn test_clamp_discount() {
        assert_eq!(clamp_discount(Decimal::from(150)), Decimal::ONE_HUNDRED);
        assert_eq!(clamp_discount(Decimal::from(-20)), Decimal::ZERO);
        assert_eq!(clamp_discount(Decimal::new(125, 1)), Decimal::new(125, 1));
    }
}
