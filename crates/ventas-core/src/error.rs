//! # Error Types
//!
//! Domain-specific error types for ventas-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Calculators (discount, line, totals)  → NEVER fail, degrade to 0      │
//! │                                                                         │
//! │  ventas-core errors (this file)                                        │
//! │  ├── CoreError        - Document-level rule violations                 │
//! │  └── ValidationError  - Field checks run when the user hits "Guardar"  │
//! │                                                                         │
//! │  ventas-app errors (separate crate)                                    │
//! │  └── AppError         - Config, serialization, backend rejections      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::DocumentKind;

// =============================================================================
// Core Error
// =============================================================================

/// Document-level errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Saving a document with no lines.
    #[error("{kind} has no items")]
    EmptyDocument { kind: DocumentKind },

    /// Editing or removing a line that is not in the document.
    #[error("Line not found: {0}")]
    LineNotFound(String),

    /// Too many lines on one document.
    #[error("Document cannot have more than {max} items")]
    DocumentTooLarge { max: usize },

    /// Importing a budget into a document kind that does not take one.
    ///
    /// ## When This Occurs
    /// - Target is itself a Presupuesto
    /// - Source is not a Presupuesto
    #[error("Cannot import {source_kind} into {target_kind}")]
    InvalidImport {
        source_kind: DocumentKind,
        target_kind: DocumentKind,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors raised at save time.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in the expected format.
    #[error("{field} has an invalid format")]
    InvalidFormat { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
