//! # Backend Client
//!
//! The sales backend is reached through an injected [`Backend`]; nothing in
//! this crate holds a global handle to it.
//!
//! ## Injection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Host (desktop shell)                                                   │
//! │    │  builds its HTTP-backed client                                    │
//! │    ▼                                                                    │
//! │  Arc<dyn Backend> ──► DocumentService::new(backend, rates)             │
//! │                                                                         │
//! │  Tests / offline tools                                                  │
//! │    └─► MemoryBackend (records every request)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each method maps to one backend endpoint and is treated as an atomic
//! request/response.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use ventas_core::DocumentKind;

use crate::error::{AppError, AppResult};
use crate::payload::DocumentPayload;

/// What the backend answers to a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub id: String,
}

/// The backend endpoints the document screens use.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST` a formal sale.
    async fn create_venta(&self, payload: &DocumentPayload) -> AppResult<SubmitReceipt>;

    /// `POST` a quick sale.
    async fn create_venta_x(&self, payload: &DocumentPayload) -> AppResult<SubmitReceipt>;

    /// `POST` a budget.
    async fn create_presupuesto(&self, payload: &DocumentPayload) -> AppResult<SubmitReceipt>;

    /// `GET` a stored budget.
    async fn get_presupuesto(&self, id: &str) -> AppResult<DocumentPayload>;

    /// Routes a create to the endpoint for `kind`.
    async fn create(
        &self,
        kind: DocumentKind,
        payload: &DocumentPayload,
    ) -> AppResult<SubmitReceipt> {
        match kind {
            DocumentKind::Venta => self.create_venta(payload).await,
            DocumentKind::VentaX => self.create_venta_x(payload).await,
            DocumentKind::Presupuesto => self.create_presupuesto(payload).await,
        }
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    submitted: Vec<(DocumentKind, DocumentPayload)>,
    presupuestos: HashMap<String, DocumentPayload>,
    reject_reason: Option<String>,
}

/// Backend kept entirely in memory.
///
/// Created budgets become fetchable with [`Backend::get_presupuesto`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that refuses every create with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        MemoryBackend {
            state: Mutex::new(MemoryState {
                reject_reason: Some(reason.into()),
                ..MemoryState::default()
            }),
        }
    }

    /// Seeds a stored budget.
    pub async fn insert_presupuesto(&self, id: impl Into<String>, payload: DocumentPayload) {
        self.state.lock().await.presupuestos.insert(id.into(), payload);
    }

    /// Every accepted create, in order.
    pub async fn submitted(&self) -> Vec<(DocumentKind, DocumentPayload)> {
        self.state.lock().await.submitted.clone()
    }

    async fn store(&self, kind: DocumentKind, payload: &DocumentPayload) -> AppResult<SubmitReceipt> {
        let mut state = self.state.lock().await;

        if let Some(reason) = &state.reject_reason {
            warn!(%kind, %reason, "Memory backend rejecting create");
            return Err(AppError::Rejected(reason.clone()));
        }

        state.next_id += 1;
        let id = state.next_id.to_string();
        state.submitted.push((kind, payload.clone()));
        if kind == DocumentKind::Presupuesto {
            state.presupuestos.insert(id.clone(), payload.clone());
        }

        debug!(%kind, %id, "Memory backend stored document");
        Ok(SubmitReceipt { id })
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn create_venta(&self, payload: &DocumentPayload) -> AppResult<SubmitReceipt> {
        self.store(DocumentKind::Venta, payload).await
    }

    async fn create_venta_x(&self, payload: &DocumentPayload) -> AppResult<SubmitReceipt> {
        self.store(DocumentKind::VentaX, payload).await
    }

    async fn create_presupuesto(&self, payload: &DocumentPayload) -> AppResult<SubmitReceipt> {
        self.store(DocumentKind::Presupuesto, payload).await
    }

    async fn get_presupuesto(&self, id: &str) -> AppResult<DocumentPayload> {
        self.state
            .lock()
            .await
            .presupuestos
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound {
                entity: "presupuesto",
                id: id.to_string(),
            })
    }
}
