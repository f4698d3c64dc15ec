//! # ventas-app: Document Editors and Backend Contract
//!
//! The layer the sales screens talk to. It keeps one document per open
//! form, recomputes its totals on every edit through `ventas-core`, and
//! turns it into the backend's request body on save.
//!
//! ## Module Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  editor   ──► DocumentEditor: the only place form edits land           │
//! │  payload  ──► Total_Item / Descuento_Porcentaje / ... JSON bodies      │
//! │  backend  ──► Backend trait (injected) + MemoryBackend                 │
//! │  service  ──► submit / import flows                                    │
//! │  config   ──► ventas.toml + VENTAS_* overrides                         │
//! │  error    ──► AppError                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod backend;
pub mod config;
pub mod editor;
pub mod error;
pub mod payload;
pub mod service;

pub use backend::{Backend, MemoryBackend, SubmitReceipt};
pub use config::{AppConfig, BackendSettings};
pub use editor::DocumentEditor;
pub use error::{AppError, AppResult};
pub use payload::{DocumentPayload, ItemPayload};
pub use service::DocumentService;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ventas=trace` - Show trace for ventas crates only
/// - Otherwise: `default_filter` (from config, `info,ventas=debug`)
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
