//! # Validation Module
//!
//! Save-time checks for document forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  While typing: calculators degrade bad input to 0, nothing is raised   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  On "Guardar": THIS MODULE                                              │
//! │  ├── every line has a positive quantity, non-negative price            │
//! │  ├── custom lines have a description                                   │
//! │  ├── manual discounts within 0..=100 where discounts apply            │
//! │  ├── client chosen (Venta, Presupuesto)                                │
//! │  └── exchange rate > 0 where an ARS total is shown                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Backend: final authority, may still reject                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Document, DocumentKind, ExchangeRate, LineItem, LineKind};
use crate::{MAX_DESCRIPTION_LEN, MAX_DOCUMENT_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use ventas_core::validation::validate_quantity;
///
/// assert!(validate_quantity(Decimal::new(25, 1)).is_ok());
/// assert!(validate_quantity(Decimal::ZERO).is_err());
/// ```
pub fn validate_quantity(qty: Decimal) -> ValidationResult<()> {
    if qty <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > Decimal::from(MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: Decimal::ZERO,
            max: Decimal::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (bonus items).
pub fn validate_unit_price(price: Decimal) -> ValidationResult<()> {
    if price < Decimal::ZERO {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: Decimal::ZERO,
            max: Decimal::MAX,
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Must be between 0 and 100 (inclusive)
///
/// Calculators clamp while the user types. Saving needs the typed value in range.
pub fn validate_discount_percent(pct: Decimal) -> ValidationResult<()> {
    if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

/// Validates a UUID string (line IDs).
pub fn validate_uuid(id: &str, field: &str) -> ValidationResult<()> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
        })
}

/// Validates a free-text line description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates the header exchange rate of a document that shows ARS.
pub fn validate_exchange_rate(rate: ExchangeRate) -> ValidationResult<()> {
    if !rate.is_usable() {
        return Err(ValidationError::MustBePositive {
            field: "exchange_rate".to_string(),
        });
    }

    Ok(())
}

/// Validates that a client was picked.
pub fn validate_client(client_id: Option<&str>) -> ValidationResult<()> {
    match client_id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(()),
        _ => Err(ValidationError::Required {
            field: "client".to_string(),
        }),
    }
}

/// Validates the number of lines on a document.
pub fn validate_line_count(kind: DocumentKind, count: usize) -> CoreResult<()> {
    if count == 0 {
        return Err(CoreError::EmptyDocument { kind });
    }

    if count > MAX_DOCUMENT_ITEMS {
        return Err(CoreError::DocumentTooLarge {
            max: MAX_DOCUMENT_ITEMS,
        });
    }

    Ok(())
}

/// Validates one line.
pub fn validate_line(item: &LineItem) -> ValidationResult<()> {
    validate_uuid(&item.id, "line_id")?;
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    if item.kind == LineKind::CustomEntry {
        validate_description(&item.description)?;
    }
    Ok(())
}

// =============================================================================
// Document Validator
// =============================================================================

/// Runs every save-time check on a document.
///
/// Quick sales (VentaX) need no client and no exchange rate.
pub fn validate_document(doc: &Document) -> CoreResult<()> {
    validate_line_count(doc.kind, doc.items.len())?;

    for item in &doc.items {
        validate_line(item)?;
        if doc.kind.applies_discounts() {
            validate_discount_percent(item.discount_percent)?;
        }
    }

    if doc.kind != DocumentKind::VentaX {
        validate_client(doc.client_id.as_deref())?;
    }

    if doc.kind.converts_to_ars() {
        validate_exchange_rate(doc.exchange_rate)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doc(kind: DocumentKind) -> Document {
        let mut doc = Document::new(
            kind,
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            ExchangeRate::new(Decimal::from(1000)),
        );
        doc.client_id = Some("C-7".to_string());
        doc.items
            .push(LineItem::custom("Instalación", Decimal::ONE, Decimal::from(80)));
        doc
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Decimal::ONE).is_ok());
        assert!(validate_quantity(Decimal::from(MAX_ITEM_QUANTITY)).is_ok());
        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(Decimal::from(-1)).is_err());
        assert!(validate_quantity(Decimal::from(MAX_ITEM_QUANTITY + 1)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Decimal::ZERO).is_ok());
        assert!(validate_unit_price(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(Decimal::ZERO).is_ok());
        assert!(validate_discount_percent(Decimal::new(125, 1)).is_ok());
        assert!(validate_discount_percent(Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_discount_percent(Decimal::from(-1)).is_err());
        assert!(validate_discount_percent(Decimal::from(150)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000", "line_id").is_ok());
        assert!(validate_uuid(&crate::types::new_line_id(), "line_id").is_ok());
        assert_eq!(
            validate_uuid("line-1", "line_id"),
            Err(ValidationError::InvalidFormat {
                field: "line_id".to_string()
            })
        );
    }

    #[test]
    fn test_out_of_range_discount_blocks_save() {
        let mut d = doc(DocumentKind::Presupuesto);
        d.items[0].discount_percent = Decimal::from(150);
        assert!(matches!(
            validate_document(&d),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        // VentaX ignores discounts entirely
        let mut d = doc(DocumentKind::VentaX);
        d.items[0].discount_percent = Decimal::from(150);
        assert!(validate_document(&d).is_ok());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Flete").is_ok());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"a".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_client() {
        assert!(validate_client(Some("C-1")).is_ok());
        assert!(validate_client(Some(" ")).is_err());
        assert!(validate_client(None).is_err());
    }

    #[test]
    fn test_valid_documents() {
        assert!(validate_document(&doc(DocumentKind::Venta)).is_ok());
        assert!(validate_document(&doc(DocumentKind::Presupuesto)).is_ok());
    }

    #[test]
    fn test_empty_document_rejected() {
        let mut d = doc(DocumentKind::Venta);
        d.items.clear();
        assert!(matches!(
            validate_document(&d),
            Err(CoreError::EmptyDocument { .. })
        ));
    }

    #[test]
    fn test_ventax_needs_no_client_or_rate() {
        let mut d = doc(DocumentKind::VentaX);
        d.client_id = None;
        d.exchange_rate = ExchangeRate::new(Decimal::ZERO);
        assert!(validate_document(&d).is_ok());
    }

    #[test]
    fn test_venta_needs_positive_rate() {
        let mut d = doc(DocumentKind::Venta);
        d.exchange_rate = ExchangeRate::new(Decimal::ZERO);
        assert!(matches!(
            validate_document(&d),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_bad_line_rejected() {
        let mut d = doc(DocumentKind::Presupuesto);
        d.items[0].quantity = Decimal::ZERO;
        assert!(validate_document(&d).is_err());
    }
}
