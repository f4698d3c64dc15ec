//! # Document Editor
//!
//! One editor for every document form (Venta, VentaX, Presupuesto). The
//! forms only forward field edits here and render [`DocumentEditor::totals`].
//!
//! ## Editor Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form Action              Editor Call              Document Change      │
//! │  ───────────              ───────────              ───────────────      │
//! │                                                                         │
//! │  Pick product ──────────► add_catalog_item() ────► push / merge line   │
//! │                                                   + tier discount      │
//! │  Type quantity ─────────► set_quantity() ────────► qty, re-suggest %   │
//! │                                                                         │
//! │  Type discount ─────────► set_discount() ────────► %, locked           │
//! │                                                                         │
//! │  Click remove ──────────► remove_item() ─────────► items.remove(i)     │
//! │                                                                         │
//! │  Type "Cotización" ─────► set_exchange_rate() ───► header rate         │
//! │                                                                         │
//! │  Any render ────────────► totals() ──────────────► (read only, fresh)  │
//! │                                                                         │
//! │  Cancel ────────────────► cancel() ──────────────► dropped             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Text setters take the raw field contents. Unparseable text is stored as
//! zero so totals stay defined while the user is still typing; the save-time
//! validation is what catches it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use ventas_core::input::{number_or_zero, parse_number};
use ventas_core::validation::validate_document;
use ventas_core::{
    resolve_discount_tier, CatalogProduct, CoreError, CoreResult, DeductionRates, Document,
    DocumentKind, DocumentTotals, ExchangeRate, LineItem, LineKind, Money, MAX_DOCUMENT_ITEMS,
};

use crate::config::AppConfig;

/// In-memory state of one document form.
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    document: Document,
    rates: DeductionRates,
}

impl DocumentEditor {
    /// Opens an empty document.
    pub fn new(
        kind: DocumentKind,
        date: NaiveDate,
        exchange_rate: ExchangeRate,
        rates: DeductionRates,
    ) -> Self {
        debug!(%kind, %date, "Opening document editor");
        DocumentEditor {
            document: Document::new(kind, date, exchange_rate),
            rates,
        }
    }

    /// Opens an empty document dated today with configured defaults.
    pub fn from_config(kind: DocumentKind, config: &AppConfig) -> Self {
        Self::new(
            kind,
            chrono::Local::now().date_naive(),
            config.pricing.exchange_rate(),
            config.pricing.deductions,
        )
    }

    /// Wraps an existing document, e.g. one loaded from a file.
    pub fn from_document(document: Document, rates: DeductionRates) -> Self {
        DocumentEditor { document, rates }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn kind(&self) -> DocumentKind {
        self.document.kind
    }

    pub fn rates(&self) -> &DeductionRates {
        &self.rates
    }

    // =========================================================================
    // Lines
    // =========================================================================

    /// Adds a catalog product, or bumps the quantity of its existing line.
    ///
    /// Returns the line ID.
    pub fn add_catalog_item(
        &mut self,
        product: &CatalogProduct,
        quantity: &str,
    ) -> CoreResult<String> {
        let quantity = number_or_zero(quantity);
        let kind = self.document.kind;

        if let Some(item) = self
            .document
            .items
            .iter_mut()
            .find(|i| i.product_id.as_deref() == Some(product.id.as_str()))
        {
            item.quantity = item.quantity.saturating_add(quantity);
            suggest_discount(kind, item);
            debug!(line = %item.id, product = %product.id, qty = %item.quantity, "Merged catalog line");
            return Ok(item.id.clone());
        }

        self.ensure_capacity(1)?;

        let mut item = LineItem::catalog(product, quantity);
        suggest_discount(kind, &mut item);
        let id = item.id.clone();
        debug!(line = %id, product = %product.id, %quantity, discount = %item.discount_percent, "Added catalog line");
        self.document.items.push(item);
        Ok(id)
    }

    /// Adds a free-text line.
    pub fn add_custom_entry(
        &mut self,
        description: &str,
        quantity: &str,
        unit_price: &str,
    ) -> CoreResult<String> {
        self.ensure_capacity(1)?;

        let item = LineItem::custom(
            description.trim(),
            number_or_zero(quantity),
            number_or_zero(unit_price),
        );
        let id = item.id.clone();
        debug!(line = %id, "Added custom line");
        self.document.items.push(item);
        Ok(id)
    }

    /// Sets a line's quantity and re-suggests its tier discount unless the
    /// user already typed one.
    pub fn set_quantity(&mut self, line_id: &str, raw: &str) -> CoreResult<()> {
        let kind = self.document.kind;
        let item = self.line_mut(line_id)?;
        item.quantity = number_or_zero(raw);
        suggest_discount(kind, item);
        debug!(line = %line_id, qty = %item.quantity, "Quantity changed");
        Ok(())
    }

    pub fn set_unit_price(&mut self, line_id: &str, raw: &str) -> CoreResult<()> {
        let item = self.line_mut(line_id)?;
        item.unit_price = number_or_zero(raw);
        debug!(line = %line_id, price = %item.unit_price, "Unit price changed");
        Ok(())
    }

    /// Sets a discount typed by the user. It sticks through later quantity
    /// changes until [`Self::reset_discount`].
    pub fn set_discount(&mut self, line_id: &str, raw: &str) -> CoreResult<()> {
        let item = self.line_mut(line_id)?;
        item.discount_percent = parse_number(raw).unwrap_or(Decimal::ZERO);
        item.discount_overridden = true;
        debug!(line = %line_id, discount = %item.discount_percent, "Discount overridden");
        Ok(())
    }

    /// Drops a manual discount and goes back to the tier suggestion.
    pub fn reset_discount(&mut self, line_id: &str) -> CoreResult<()> {
        let kind = self.document.kind;
        let item = self.line_mut(line_id)?;
        item.discount_overridden = false;
        suggest_discount(kind, item);
        Ok(())
    }

    pub fn set_description(&mut self, line_id: &str, description: &str) -> CoreResult<()> {
        self.line_mut(line_id)?.description = description.trim().to_string();
        Ok(())
    }

    /// Removes a line and returns it.
    pub fn remove_item(&mut self, line_id: &str) -> CoreResult<LineItem> {
        let pos = self
            .document
            .items
            .iter()
            .position(|i| i.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        debug!(line = %line_id, "Removed line");
        Ok(self.document.items.remove(pos))
    }

    // =========================================================================
    // Header
    // =========================================================================

    /// Sets the ARS/USD rate from the header field.
    pub fn set_exchange_rate(&mut self, raw: &str) {
        self.document.exchange_rate = ExchangeRate::new(number_or_zero(raw));
        debug!(rate = %self.document.exchange_rate.value(), "Exchange rate changed");
    }

    pub fn set_client(&mut self, client_id: Option<String>) {
        self.document.client_id = client_id.filter(|id| !id.trim().is_empty());
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.document.date = date;
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Recomputes every total from the current lines and rate.
    pub fn totals(&self) -> DocumentTotals {
        self.document.totals(&self.rates)
    }

    /// Recomputes one line's total.
    pub fn line_total(&self, line_id: &str) -> Option<Money> {
        self.document
            .item(line_id)
            .map(|item| item.line_total_for(self.document.kind))
    }

    // =========================================================================
    // Budget Import
    // =========================================================================

    /// Copies the lines of a Presupuesto into this sale.
    ///
    /// Imported lines keep the budget's negotiated discount (locked). The
    /// client is taken from the budget only if none is set yet. The sale's
    /// own exchange rate is kept.
    ///
    /// Returns the number of lines imported.
    pub fn import_budget(&mut self, budget: &Document) -> CoreResult<usize> {
        if budget.kind != DocumentKind::Presupuesto || !self.document.kind.accepts_budget_import()
        {
            return Err(CoreError::InvalidImport {
                source_kind: budget.kind,
                target_kind: self.document.kind,
            });
        }

        self.ensure_capacity(budget.items.len())?;

        for source in &budget.items {
            let mut item = source.clone();
            item.id = ventas_core::types::new_line_id();
            if item.kind == LineKind::CatalogProduct {
                item.discount_overridden = true;
            }
            self.document.items.push(item);
        }

        if self.document.client_id.is_none() {
            self.document.client_id = budget.client_id.clone();
        }

        debug!(lines = budget.items.len(), target = %self.document.kind, "Imported budget");
        Ok(budget.items.len())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Runs the save-time checks.
    pub fn validate(&self) -> CoreResult<()> {
        validate_document(&self.document)
    }

    /// Discards the document.
    pub fn cancel(self) {
        debug!(kind = %self.document.kind, lines = self.document.items.len(), "Editor cancelled");
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    fn line_mut(&mut self, line_id: &str) -> CoreResult<&mut LineItem> {
        self.document
            .item_mut(line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))
    }

    fn ensure_capacity(&self, extra: usize) -> CoreResult<()> {
        if self.document.items.len() + extra > MAX_DOCUMENT_ITEMS {
            return Err(CoreError::DocumentTooLarge {
                max: MAX_DOCUMENT_ITEMS,
            });
        }
        Ok(())
    }
}

/// Applies the tier suggestion to a catalog line the user has not
/// overridden.
fn suggest_discount(kind: DocumentKind, item: &mut LineItem) {
    if item.kind == LineKind::CatalogProduct && kind.applies_discounts() && !item.discount_overridden
    {
        item.discount_percent = resolve_discount_tier(item.quantity);
    }
}
