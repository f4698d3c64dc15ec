//! # Domain Types
//!
//! The data model of a sales document being composed in the UI.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Document     │   │    LineItem     │   │ CatalogProduct  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  kind           │──►│  id (UUID)      │◄──│  id             │       │
//! │  │  date           │   │  kind           │   │  name           │       │
//! │  │  client_id      │   │  quantity       │   │  price          │       │
//! │  │  exchange_rate  │   │  unit_price     │   └─────────────────┘       │
//! │  │  items          │   │  discount_%     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DocumentKind   │   │    LineKind     │   │  ExchangeRate   │       │
//! │  │  Venta          │   │  CatalogProduct │   │  ARS per USD    │       │
//! │  │  VentaX         │   │  CustomEntry    │   │  usable iff > 0 │       │
//! │  │  Presupuesto    │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line's total is never stored: [`LineItem::line_total_for`] recomputes it
//! from the current inputs every time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::line::line_total;
use crate::money::Money;

// =============================================================================
// Document Kind
// =============================================================================

/// The three document editors of the sales screens.
///
/// ## Policy Matrix
/// ```text
/// ┌──────────────┬───────────┬────────────┬────────────┐
/// │              │ discounts │ ARS total  │ deductions │
/// ├──────────────┼───────────┼────────────┼────────────┤
/// │ Venta        │    yes    │    yes     │    yes     │
/// │ VentaX       │    no     │    no      │    no      │
/// │ Presupuesto  │    yes    │    yes     │    no      │
/// └──────────────┴───────────┴────────────┴────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DocumentKind {
    /// Formal invoiced sale.
    Venta,
    /// Informal quick sale, no tax breakdown.
    VentaX,
    /// Budget / quote, can be imported into a sale.
    Presupuesto,
}

impl DocumentKind {
    /// Whether catalog lines get a discount percentage.
    pub const fn applies_discounts(&self) -> bool {
        matches!(self, DocumentKind::Venta | DocumentKind::Presupuesto)
    }

    /// Whether the document shows an ARS-equivalent total.
    pub const fn converts_to_ars(&self) -> bool {
        matches!(self, DocumentKind::Venta | DocumentKind::Presupuesto)
    }

    /// Whether the document carries the IIBB / transfer / gains breakdown.
    pub const fn has_deductions(&self) -> bool {
        matches!(self, DocumentKind::Venta)
    }

    /// Whether a budget can be imported into this kind of document.
    pub const fn accepts_budget_import(&self) -> bool {
        matches!(self, DocumentKind::Venta | DocumentKind::VentaX)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Venta => write!(f, "venta"),
            DocumentKind::VentaX => write!(f, "ventax"),
            DocumentKind::Presupuesto => write!(f, "presupuesto"),
        }
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// ARS per USD, as typed in the document header.
///
/// A zero or negative rate is kept as entered (the field may be mid-edit)
/// but is never used for conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExchangeRate(
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    Decimal,
);

impl ExchangeRate {
    /// Wraps a rate.
    #[inline]
    pub const fn new(ars_per_usd: Decimal) -> Self {
        ExchangeRate(ars_per_usd)
    }

    /// Returns the raw rate.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// True when the rate can be multiplied by.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

// =============================================================================
// Catalog Product
// =============================================================================

/// A product as listed by the backend catalog, frozen at selection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogProduct {
    /// Backend product identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// List price (USD).
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub price: Decimal,
}

// =============================================================================
// Line Item
// =============================================================================

/// Generates a fresh editor-local line ID.
pub fn new_line_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// What a line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LineKind {
    /// Picked from the product catalog.
    CatalogProduct,
    /// Free-text row (service, freight, one-off item).
    CustomEntry,
}

/// One row of a sales or budget document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Editor-local identifier (UUID v4).
    #[serde(default = "new_line_id")]
    pub id: String,

    pub kind: LineKind,

    /// Backend product ID, catalog lines only.
    #[serde(default)]
    pub product_id: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub quantity: Decimal,

    /// Price before discount.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub unit_price: Decimal,

    /// Percentage as entered; clamped only when computing.
    #[serde(default, with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub discount_percent: Decimal,

    /// Set once the user types a discount; stops tier re-suggestion.
    #[serde(default)]
    pub discount_overridden: bool,
}

impl LineItem {
    /// Creates a catalog line with no discount.
    pub fn catalog(product: &CatalogProduct, quantity: Decimal) -> Self {
        LineItem {
            id: new_line_id(),
            kind: LineKind::CatalogProduct,
            product_id: Some(product.id.clone()),
            description: product.name.clone(),
            quantity,
            unit_price: product.price,
            discount_percent: Decimal::ZERO,
            discount_overridden: false,
        }
    }

    /// Creates a free-text line.
    pub fn custom(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        LineItem {
            id: new_line_id(),
            kind: LineKind::CustomEntry,
            product_id: None,
            description: description.into(),
            quantity,
            unit_price,
            discount_percent: Decimal::ZERO,
            discount_overridden: false,
        }
    }

    /// The discount that actually applies on a document of `doc_kind`.
    ///
    /// Custom entries and documents without discounts always get zero.
    pub fn effective_discount(&self, doc_kind: DocumentKind) -> Decimal {
        match self.kind {
            LineKind::CatalogProduct if doc_kind.applies_discounts() => self.discount_percent,
            _ => Decimal::ZERO,
        }
    }

    /// Recomputes this line's total for a document of `doc_kind`.
    pub fn line_total_for(&self, doc_kind: DocumentKind) -> Money {
        line_total(self.quantity, self.unit_price, self.effective_discount(doc_kind))
    }
}

// =============================================================================
// Document
// =============================================================================

/// A sales document as held in UI state until it is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Document {
    pub kind: DocumentKind,

    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Backend client identifier (counterparty).
    pub client_id: Option<String>,

    pub exchange_rate: ExchangeRate,

    /// Ordered as displayed.
    pub items: Vec<LineItem>,
}

impl Document {
    /// Creates an empty document.
    pub fn new(kind: DocumentKind, date: NaiveDate, exchange_rate: ExchangeRate) -> Self {
        Document {
            kind,
            date,
            client_id: None,
            exchange_rate,
            items: Vec::new(),
        }
    }

    /// Finds a line by its editor-local ID.
    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Mutable lookup by editor-local ID.
    pub fn item_mut(&mut self, id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> CatalogProduct {
        CatalogProduct {
            id: "P-1".to_string(),
            name: "Cable UTP".to_string(),
            price: Decimal::from(100),
        }
    }

    #[test]
    fn test_kind_policies() {
        assert!(DocumentKind::Venta.applies_discounts());
        assert!(DocumentKind::Presupuesto.applies_discounts());
        assert!(!DocumentKind::VentaX.applies_discounts());

        assert!(DocumentKind::Venta.has_deductions());
        assert!(!DocumentKind::Presupuesto.has_deductions());
        assert!(!DocumentKind::VentaX.converts_to_ars());

        assert!(DocumentKind::VentaX.accepts_budget_import());
        assert!(!DocumentKind::Presupuesto.accepts_budget_import());
    }

    #[test]
    fn test_exchange_rate_usable() {
        assert!(ExchangeRate::new(Decimal::from(1050)).is_usable());
        assert!(!ExchangeRate::new(Decimal::ZERO).is_usable());
        assert!(!ExchangeRate::new(Decimal::from(-1)).is_usable());
    }

    #[test]
    fn test_custom_entry_ignores_discount() {
        let mut line = LineItem::custom("Flete", Decimal::ONE, Decimal::from(100));
        line.discount_percent = Decimal::from(50);
        assert_eq!(line.line_total_for(DocumentKind::Venta).cents(), 10000);
    }

    #[test]
    fn test_ventax_ignores_discount() {
        let mut line = LineItem::catalog(&product(), Decimal::from(10));
        line.discount_percent = Decimal::from(5);
        assert_eq!(line.line_total_for(DocumentKind::Venta).cents(), 95000);
        assert_eq!(line.line_total_for(DocumentKind::VentaX).cents(), 100000);
    }

    #[test]
    fn test_line_total_tracks_inputs() {
        let mut line = LineItem::catalog(&product(), Decimal::ONE);
        assert_eq!(line.line_total_for(DocumentKind::Venta).cents(), 10000);
        line.quantity = Decimal::from(3);
        assert_eq!(line.line_total_for(DocumentKind::Venta).cents(), 30000);
    }

    #[test]
    fn test_line_item_json_uses_numbers() {
        let line = LineItem::custom("Flete", Decimal::new(15, 1), Decimal::from(20));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["quantity"], serde_json::json!(1.5));
        assert_eq!(json["unit_price"], serde_json::json!(20.0));
    }
}
