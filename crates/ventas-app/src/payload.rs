//! # Backend Request Bodies
//!
//! The JSON shapes the sales backend expects when a document is saved, and
//! returns when a budget is fetched. Field names are the backend's, not ours.
//!
//! ## Venta Body
//! ```json
//! {
//!   "Fecha": "2024-06-03",
//!   "Cliente_ID": "C-9",
//!   "Cotizacion_Dolar": 1000.0,
//!   "Subtotal": 1003.0,
//!   "Total": 1003.0,
//!   "Total_ARS": 1003000.0,
//!   "IIBB": 35.11, "Transferencia": 23.07, "Ganancia": 150.45, "Neto": 794.37,
//!   "Items": [
//!     {
//!       "Producto_ID": "P-1", "Descripcion": "Cable UTP",
//!       "Cantidad": 10.0, "Precio_Unitario": 50.0,
//!       "Descuento_Porcentaje": 5.0, "Total_Item": 475.0
//!     }
//!   ]
//! }
//! ```
//!
//! VentaX bodies carry no rate, ARS total or deductions. Presupuesto bodies
//! carry the rate and ARS total but no deductions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ventas_core::types::new_line_id;
use ventas_core::{
    DeductionRates, Document, DocumentKind, DocumentTotals, ExchangeRate, LineItem, LineKind,
    Money,
};

// =============================================================================
// Item
// =============================================================================

/// One line as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(rename = "Producto_ID", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(rename = "Descripcion")]
    pub description: String,

    #[serde(rename = "Cantidad", with = "rust_decimal::serde::float")]
    pub quantity: Decimal,

    #[serde(rename = "Precio_Unitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// The discount actually applied (clamped, zero where not applicable).
    #[serde(rename = "Descuento_Porcentaje", with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,

    #[serde(rename = "Total_Item", with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl ItemPayload {
    pub fn from_line(item: &LineItem, kind: DocumentKind) -> Self {
        ItemPayload {
            product_id: item.product_id.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount_percent: ventas_core::discount::clamp_discount(item.effective_discount(kind)),
            total: item.line_total_for(kind).to_decimal(),
        }
    }

    /// Rebuilds an editable line. The stored discount is kept as a manual one.
    pub fn into_line(self) -> LineItem {
        let kind = if self.product_id.is_some() {
            LineKind::CatalogProduct
        } else {
            LineKind::CustomEntry
        };
        LineItem {
            id: new_line_id(),
            kind,
            product_id: self.product_id,
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount_percent: self.discount_percent,
            discount_overridden: kind == LineKind::CatalogProduct,
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// A whole document as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
    #[serde(rename = "Fecha")]
    pub date: NaiveDate,

    #[serde(rename = "Cliente_ID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(
        rename = "Cotizacion_Dolar",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub exchange_rate: Option<Decimal>,

    #[serde(rename = "Subtotal", with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    #[serde(rename = "Total", with = "rust_decimal::serde::float")]
    pub total: Decimal,

    #[serde(
        rename = "Total_ARS",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_ars: Option<Decimal>,

    #[serde(
        rename = "IIBB",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub iibb: Option<Decimal>,

    #[serde(
        rename = "Transferencia",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub transf: Option<Decimal>,

    #[serde(
        rename = "Ganancia",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub gain: Option<Decimal>,

    #[serde(
        rename = "Neto",
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub net: Option<Decimal>,

    #[serde(rename = "Items")]
    pub items: Vec<ItemPayload>,
}

impl DocumentPayload {
    /// Serializes a document with its freshly derived totals.
    pub fn build(doc: &Document, totals: &DocumentTotals) -> Self {
        let d = totals.deductions;
        DocumentPayload {
            date: doc.date,
            client_id: doc.client_id.clone(),
            exchange_rate: doc
                .kind
                .converts_to_ars()
                .then(|| doc.exchange_rate.value()),
            subtotal: totals.subtotal.to_decimal(),
            total: totals.total_usd.to_decimal(),
            total_ars: totals.total_ars.map(|m| m.to_decimal()),
            iibb: d.map(|d| d.iibb.to_decimal()),
            transf: d.map(|d| d.transf.to_decimal()),
            gain: d.map(|d| d.gain.to_decimal()),
            net: d.map(|d| d.net_after_deductions.to_decimal()),
            items: doc
                .items
                .iter()
                .map(|item| ItemPayload::from_line(item, doc.kind))
                .collect(),
        }
    }

    /// Computes totals and serializes in one go.
    pub fn from_document(doc: &Document, rates: &DeductionRates) -> Self {
        Self::build(doc, &doc.totals(rates))
    }

    /// Rebuilds an editable document of `kind`. Stored totals are dropped;
    /// they are re-derived from the lines.
    pub fn into_document(self, kind: DocumentKind) -> Document {
        Document {
            kind,
            date: self.date,
            client_id: self.client_id,
            exchange_rate: ExchangeRate::new(self.exchange_rate.unwrap_or_default()),
            items: self.items.into_iter().map(ItemPayload::into_line).collect(),
        }
    }

    /// The stored total as money, for comparing against a re-derivation.
    pub fn stored_total(&self) -> Money {
        Money::from_decimal(self.total)
    }
}
