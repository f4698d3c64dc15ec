//! # Document Service
//!
//! Save and import flows on top of an injected [`Backend`].
//!
//! ## Save Flow
//! ```text
//! "Guardar" ──► validate() ──► totals() ──► DocumentPayload ──► backend.create()
//!                  │                                                 │
//!                  └── Err: user fixes the form                      └── receipt
//! ```
//!
//! The editor is borrowed, not consumed, so a rejected save leaves the
//! form exactly as it was.

use std::sync::Arc;
use tracing::{info, warn};
use ventas_core::{DeductionRates, Document, DocumentKind};

use crate::backend::{Backend, SubmitReceipt};
use crate::editor::DocumentEditor;
use crate::error::AppResult;
use crate::payload::DocumentPayload;

pub struct DocumentService {
    backend: Arc<dyn Backend>,
    rates: DeductionRates,
}

impl DocumentService {
    pub fn new(backend: Arc<dyn Backend>, rates: DeductionRates) -> Self {
        DocumentService { backend, rates }
    }

    /// Validates, serializes and sends the editor's document.
    ///
    /// The body carries the same totals the editor shows.
    pub async fn submit(&self, editor: &DocumentEditor) -> AppResult<SubmitReceipt> {
        editor.validate()?;

        let doc = editor.document();
        let payload = DocumentPayload::build(doc, &editor.totals());

        match self.backend.create(doc.kind, &payload).await {
            Ok(receipt) => {
                info!(kind = %doc.kind, id = %receipt.id, total = %payload.total, "Document saved");
                Ok(receipt)
            }
            Err(e) => {
                warn!(kind = %doc.kind, error = %e, "Document save failed");
                Err(e)
            }
        }
    }

    /// Fetches a stored budget as an editable document.
    ///
    /// Totals are re-derived from the lines; a mismatch with the stored
    /// total is logged, not fatal.
    pub async fn fetch_presupuesto(&self, id: &str) -> AppResult<Document> {
        let payload = self.backend.get_presupuesto(id).await?;
        let stored = payload.stored_total();
        let doc = payload.into_document(DocumentKind::Presupuesto);

        let recomputed = doc.totals(&self.rates).total_usd;
        if recomputed != stored {
            warn!(%id, %stored, %recomputed, "Budget total differs from backend");
        }
        Ok(doc)
    }

    /// Fetches a budget and copies its lines into `editor`.
    pub async fn import_presupuesto(&self, id: &str, editor: &mut DocumentEditor) -> AppResult<usize> {
        let budget = self.fetch_presupuesto(id).await?;
        let count = editor.import_budget(&budget)?;
        info!(%id, lines = count, target = %editor.kind(), "Budget imported");
        Ok(count)
    }
}
