//! # Document Totals Tool
//!
//! Computes the totals and backend body of a document stored as JSON.
//! Handy for checking a disputed figure against the backend.
//!
//! ## Usage
//! ```bash
//! cargo run -p ventas-app --bin ventas-totals -- venta.json
//!
//! # Custom config file
//! cargo run -p ventas-app --bin ventas-totals -- venta.json --config ./ventas.toml
//! ```
//!
//! ## Input
//! ```json
//! {
//!   "kind": "Venta", "date": "2024-06-03", "client_id": "C-9",
//!   "exchange_rate": 1000,
//!   "items": [
//!     { "kind": "CatalogProduct", "product_id": "P-1", "description": "Cable",
//!       "quantity": 10, "unit_price": 50, "discount_percent": 5 }
//!   ]
//! }
//! ```
//!
//! ## Output
//! `totals_cents` holds integer cents (`100300`). `payload` is the backend
//! body in currency units (`1003.0`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;
use tracing::{error, info};
use ventas_app::{AppConfig, AppResult, DocumentEditor, DocumentPayload};
use ventas_core::{Document, DocumentTotals};

#[derive(Serialize)]
struct Output {
    totals_cents: DocumentTotals,
    payload: DocumentPayload,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let mut document_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            other => document_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let Some(document_path) = document_path else {
        eprintln!("usage: ventas-totals <document.json> [--config <ventas.toml>]");
        return ExitCode::from(2);
    };

    let config = AppConfig::load_or_default(config_path);
    ventas_app::init_tracing(&config.logging.filter);

    match run(&document_path, &config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(path = ?document_path, error = %e, "Failed to compute totals");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path, config: &AppConfig) -> AppResult<String> {
    let contents = std::fs::read_to_string(path)?;
    let document: Document = serde_json::from_str(&contents)?;
    info!(kind = %document.kind, lines = document.items.len(), "Loaded document");

    let editor = DocumentEditor::from_document(document, config.pricing.deductions);
    let totals = editor.totals();
    let payload = DocumentPayload::build(editor.document(), &totals);

    if let Err(e) = editor.validate() {
        info!(error = %e, "Document would not pass save-time validation");
    }

    Ok(serde_json::to_string_pretty(&Output {
        totals_cents: totals,
        payload,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_labels_units() {
        let path = std::env::temp_dir().join(format!("ventas-totals-{}.json", std::process::id()));
        let doc = r#"{
            "kind": "VentaX", "date": "2024-06-03", "client_id": null,
            "exchange_rate": 0,
            "items": [
                { "kind": "CustomEntry", "description": "Flete",
                  "quantity": 1, "unit_price": 1003 }
            ]
        }"#;
        std::fs::write(&path, doc).unwrap();

        let out = run(&path, &AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["totals_cents"]["subtotal"], serde_json::json!(100300));
        assert_eq!(value["payload"]["Subtotal"], serde_json::json!(1003.0));

        std::fs::remove_file(path).unwrap();
    }
}
