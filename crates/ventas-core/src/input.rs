//! # Numeric Input
//!
//! Turns what the user typed into a form field into a number the
//! calculators can use.
//!
//! Fields are edited live, so they are routinely empty (`""`), half typed
//! (`"12,"`) or plain wrong (`"abc"`). None of that is an error here: it
//! parses to `None` and the calculators treat it as zero.
//!
//! ## Accepted Formats
//! ```text
//! "12"        → 12
//! " 12.5 "    → 12.5
//! "12,5"      → 12.5        (comma decimal separator)
//! "1.234,56"  → 1234.56     (dot thousands + comma decimal)
//! "1.234"     → 1.234       (a lone dot is always decimal)
//! ""  "abc"  "1e3"  "--1"  → None
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a form field into a decimal.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use ventas_core::input::parse_number;
///
/// assert_eq!(parse_number("12,5"), Some(Decimal::new(125, 1)));
/// assert_eq!(parse_number(""), None);
/// ```
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let body = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let normalized = if trimmed.contains(',') && trimmed.contains('.') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.replace(',', ".")
    };

    Decimal::from_str(&normalized).ok()
}

/// Converts a float into a decimal. NaN and infinities become `None`.
pub fn number_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Parses a form field, degrading anything unusable to zero.
pub fn number_or_zero(raw: &str) -> Decimal {
    parse_number(raw).unwrap_or(Decimal::ZERO)
}

/// Converts a float, degrading NaN and infinities to zero.
pub fn number_or_zero_f64(value: f64) -> Decimal {
    number_from_f64(value).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number("12"), Some(Decimal::from(12)));
        assert_eq!(parse_number(" 12.5 "), Some(Decimal::new(125, 1)));
        assert_eq!(parse_number("-3"), Some(Decimal::from(-3)));
        assert_eq!(parse_number("+3"), Some(Decimal::from(3)));
    }

    #[test]
    fn test_parse_comma_separators() {
        assert_eq!(parse_number("12,5"), Some(Decimal::new(125, 1)));
        assert_eq!(parse_number("1.234,56"), Some(Decimal::new(123456, 2)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("1e3"), None);
        assert_eq!(parse_number("--1"), None);
        assert_eq!(parse_number("1.234"), Some(Decimal::new(1234, 3)));
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(number_from_f64(2.5), Some(Decimal::new(25, 1)));
        assert_eq!(number_from_f64(f64::NAN), None);
        assert_eq!(number_from_f64(f64::INFINITY), None);
        assert_eq!(number_or_zero_f64(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_or_zero() {
        assert_eq!(number_or_zero("x"), Decimal::ZERO);
        assert_eq!(number_or_zero("7"), Decimal::from(7));
    }
}
