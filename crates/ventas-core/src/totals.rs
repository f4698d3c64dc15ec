//! # Document Totals
//!
//! Derives subtotal, USD total, ARS total and (for formal sales) the
//! deduction breakdown from a document's lines.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► Σ line_total ──► subtotal ──► total_usd                      │
//! │                                              │                          │
//! │                       rate > 0 && kind ──────┼──► total_ars = usd×rate  │
//! │                       converts to ARS        │    (blank otherwise)     │
//! │                                              │                          │
//! │                       Venta only ────────────┴──► iibb    3.5%          │
//! │                                                   transf  2.3%          │
//! │                                                   gain   15.0%          │
//! │                                                   net = usd − all three │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is re-derived from scratch on each call. There is no cached
//! partial sum to go stale when a line is edited.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Document, DocumentKind, ExchangeRate, LineItem};

// =============================================================================
// Deduction Rates
// =============================================================================

/// Percentages withheld in the formal-sale breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRates {
    /// Ingresos Brutos, percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub iibb: Decimal,

    /// Bank transfer cost, percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub transf: Decimal,

    /// Income tax provision, percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub gain: Decimal,
}

impl Default for DeductionRates {
    fn default() -> Self {
        DeductionRates {
            iibb: Decimal::new(35, 1),
            transf: Decimal::new(23, 1),
            gain: Decimal::from(15),
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Deduction breakdown of a formal sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Deductions {
    pub iibb: Money,
    pub transf: Money,
    pub gain: Money,
    pub net_after_deductions: Money,
}

impl Deductions {
    /// Computes the breakdown.
    ///
    /// Each amount is rounded once from the exact product. The net is
    /// derived from the exact (unrounded) deductions and rounded once too,
    /// so it may differ by a cent from `total − iibb − transf − gain` on
    /// the rounded figures.
    pub fn compute(subtotal: Money, total_usd: Money, rates: &DeductionRates) -> Self {
        let base = subtotal.to_decimal();
        let iibb = base * rates.iibb / Decimal::ONE_HUNDRED;
        let transf = base * rates.transf / Decimal::ONE_HUNDRED;
        let gain = base * rates.gain / Decimal::ONE_HUNDRED;
        let net = total_usd.to_decimal() - iibb - transf - gain;

        Deductions {
            iibb: Money::from_decimal(iibb),
            transf: Money::from_decimal(transf),
            gain: Money::from_decimal(gain),
            net_after_deductions: Money::from_decimal(net),
        }
    }
}

/// Everything the totals panel of a document shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentTotals {
    pub subtotal: Money,

    pub total_usd: Money,

    /// `None` when the rate is not positive or the kind has no ARS column.
    pub total_ars: Option<Money>,

    /// Only for kinds with a deduction breakdown.
    pub deductions: Option<Deductions>,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Sums line totals. Each line is already rounded, so the sum is exact.
pub fn subtotal(kind: DocumentKind, items: &[LineItem]) -> Money {
    items.iter().map(|item| item.line_total_for(kind)).sum()
}

/// Converts a USD amount to ARS, or `None` for a non-positive rate.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use ventas_core::money::Money;
/// use ventas_core::totals::to_ars;
/// use ventas_core::types::ExchangeRate;
///
/// let usd = Money::from_cents(100300);
/// let ars = to_ars(usd, ExchangeRate::new(Decimal::from(1000)));
/// assert_eq!(ars.map(|m| m.cents()), Some(100_300_000));
/// assert_eq!(to_ars(usd, ExchangeRate::new(Decimal::ZERO)), None);
/// ```
pub fn to_ars(total_usd: Money, rate: ExchangeRate) -> Option<Money> {
    if !rate.is_usable() {
        return None;
    }
    total_usd
        .to_decimal()
        .checked_mul(rate.value())
        .map(Money::from_decimal)
}

/// Derives all totals for a list of lines.
///
/// Pure: identical inputs always produce identical output.
pub fn aggregate(
    kind: DocumentKind,
    items: &[LineItem],
    rate: ExchangeRate,
    rates: &DeductionRates,
) -> DocumentTotals {
    let subtotal = subtotal(kind, items);
    let total_usd = subtotal;

    let total_ars = if kind.converts_to_ars() {
        to_ars(total_usd, rate)
    } else {
        None
    };

    let deductions = kind
        .has_deductions()
        .then(|| Deductions::compute(subtotal, total_usd, rates));

    DocumentTotals {
        subtotal,
        total_usd,
        total_ars,
        deductions,
    }
}

impl Document {
    /// Derives this document's totals.
    pub fn totals(&self, rates: &DeductionRates) -> DocumentTotals {
        aggregate(self.kind, &self.items, self.exchange_rate, rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::resolve_discount_tier;
    use crate::types::CatalogProduct;

    fn catalog_line(qty: i64, price: i64) -> LineItem {
        let product = CatalogProduct {
            id: format!("P-{}", price),
            name: "Producto".to_string(),
            price: Decimal::from(price),
        };
        let mut line = LineItem::catalog(&product, Decimal::from(qty));
        line.discount_percent = resolve_discount_tier(line.quantity);
        line
    }

    fn rate(r: i64) -> ExchangeRate {
        ExchangeRate::new(Decimal::from(r))
    }

    #[test]
    fn test_tiered_scenario_subtotal() {
        // 10×50×0.95 + 60×10×0.88 = 475 + 528
        let items = vec![catalog_line(10, 50), catalog_line(60, 10)];
        let totals = aggregate(DocumentKind::Venta, &items, rate(1000), &DeductionRates::default());
        assert_eq!(totals.subtotal.to_string(), "1003.00");
        assert_eq!(totals.total_usd, totals.subtotal);
        assert_eq!(totals.total_ars, Some(Money::from_cents(100_300_000)));
    }

    #[test]
    fn test_non_positive_rate_blanks_ars() {
        let items = vec![catalog_line(1, 100)];
        let defaults = DeductionRates::default();
        assert_eq!(aggregate(DocumentKind::Venta, &items, rate(0), &defaults).total_ars, None);
        assert_eq!(aggregate(DocumentKind::Venta, &items, rate(-5), &defaults).total_ars, None);
    }

    #[test]
    fn test_ventax_has_no_ars_or_deductions() {
        let items = vec![catalog_line(60, 10)];
        let totals = aggregate(DocumentKind::VentaX, &items, rate(1000), &DeductionRates::default());
        // No tier discount on quick sales.
        assert_eq!(totals.subtotal.cents(), 60000);
        assert_eq!(totals.total_ars, None);
        assert_eq!(totals.deductions, None);
    }

    #[test]
    fn test_presupuesto_has_ars_but_no_deductions() {
        let items = vec![catalog_line(10, 100)];
        let totals = aggregate(
            DocumentKind::Presupuesto,
            &items,
            rate(2),
            &DeductionRates::default(),
        );
        assert_eq!(totals.total_ars, Some(Money::from_cents(190000)));
        assert_eq!(totals.deductions, None);
    }

    #[test]
    fn test_deductions_breakdown() {
        let items = vec![catalog_line(1, 1000)];
        let totals = aggregate(DocumentKind::Venta, &items, rate(1), &DeductionRates::default());
        let d = totals.deductions.unwrap();
        assert_eq!(d.iibb.to_string(), "35.00");
        assert_eq!(d.transf.to_string(), "23.00");
        assert_eq!(d.gain.to_string(), "150.00");
        assert_eq!(d.net_after_deductions.to_string(), "792.00");
    }

    #[test]
    fn test_net_uses_unrounded_deductions() {
        // subtotal 0.30: iibb 0.0105, transf 0.0069, gain 0.045
        // rounded each: 0.01, 0.01, 0.05 → naive net would be 0.23
        // exact net: 0.30 − 0.0624 = 0.2376 → 0.24
        let d = Deductions::compute(
            Money::from_cents(30),
            Money::from_cents(30),
            &DeductionRates::default(),
        );
        assert_eq!(d.iibb.cents(), 1);
        assert_eq!(d.transf.cents(), 1);
        assert_eq!(d.gain.cents(), 5);
        assert_eq!(d.net_after_deductions.cents(), 24);
    }

    #[test]
    fn test_empty_document() {
        let totals = aggregate(DocumentKind::Venta, &[], rate(1000), &DeductionRates::default());
        assert!(totals.subtotal.is_zero());
        assert_eq!(totals.total_ars, Some(Money::zero()));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let items = vec![catalog_line(10, 50), catalog_line(30, 7)];
        let defaults = DeductionRates::default();
        let first = aggregate(DocumentKind::Venta, &items, rate(950), &defaults);
        let second = aggregate(DocumentKind::Venta, &items, rate(950), &defaults);
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_totals_follow_edits() {
        let mut doc = Document::new(
            DocumentKind::Venta,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            rate(1000),
        );
        doc.items.push(catalog_line(10, 50));
        assert_eq!(doc.totals(&DeductionRates::default()).subtotal.cents(), 47500);

        doc.items[0].quantity = Decimal::from(20);
        assert_eq!(doc.totals(&DeductionRates::default()).subtotal.cents(), 95000);

        doc.exchange_rate = rate(0);
        assert_eq!(doc.totals(&DeductionRates::default()).total_ars, None);
    }
}
