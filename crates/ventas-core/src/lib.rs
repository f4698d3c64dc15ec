//! # ventas-core: Pure Pricing Logic for Sales Documents
//!
//! This crate holds the arithmetic behind the sales, quick-sale and budget
//! editors, as pure functions with zero I/O dependencies. The backend owns
//! the authoritative numbers; this crate mirrors them so the screens can
//! show totals while the user types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ventas Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Venta form ──► VentaX form ──► Presupuesto form              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ventas-app                                   │   │
//! │  │    DocumentEditor, payloads, injected Backend client            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ventas-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ discount  │  │   line    │  │  totals   │  │ validation│  │   │
//! │  │   │  tiers    │  │ line_total│  │ aggregate │  │ save-time │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money in cents and the one rounding rule
//! - [`input`] - Form text to decimals, never failing
//! - [`discount`] - Quantity tier → default discount
//! - [`line`] - Line totals
//! - [`totals`] - Document subtotal, ARS total, deductions
//! - [`types`] - Document, LineItem, DocumentKind
//! - [`validation`] - Save-time checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, nothing cached
//! 2. **Total Calculators**: bad numeric input degrades to zero, never panics
//! 3. **Round Once**: every derived amount is rounded half-up to 2 places once
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use ventas_core::discount::resolve_discount_tier;
//! use ventas_core::line::line_total;
//!
//! let qty = Decimal::from(60);
//! let discount = resolve_discount_tier(qty); // 12%
//! let total = line_total(qty, Decimal::from(10), discount);
//! assert_eq!(total.to_string(), "528.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod input;
pub mod line;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::resolve_discount_tier;
pub use error::{CoreError, CoreResult, ValidationError};
pub use line::line_total;
pub use money::Money;
pub use totals::{aggregate, DeductionRates, Deductions, DocumentTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed on a single document.
pub const MAX_DOCUMENT_ITEMS: usize = 200;

/// Maximum quantity on a single line.
///
/// ## Business Reason
/// Catches a stray extra zero before it reaches the backend.
pub const MAX_ITEM_QUANTITY: i64 = 100_000;

/// Maximum length of a free-text line description.
pub const MAX_DESCRIPTION_LEN: usize = 200;
