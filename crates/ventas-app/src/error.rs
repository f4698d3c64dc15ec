//! # App Error Types
//!
//! Everything that can go wrong outside the pure calculators.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Domain      │  │  Configuration  │  │       Backend           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Core (wraps    │  │  InvalidConfig  │  │  Rejected               │ │
//! │  │  validation)    │  │  Io / Toml      │  │  NotFound               │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use ventas_core::{CoreError, ValidationError};

/// Result type alias for app operations.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Document rule or field validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No config path could be determined.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// The backend refused the request.
    #[error("Backend rejected request: {0}")]
    Rejected(String),

    /// The backend has no such record.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(err.into())
    }
}

impl AppError {
    /// True for errors the user can fix in the form.
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, AppError::Core(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_core() {
        let err: AppError = ValidationError::Required {
            field: "client".to_string(),
        }
        .into();
        assert!(err.is_user_fixable());
        assert_eq!(err.to_string(), "Validation error: client is required");
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::NotFound {
            entity: "presupuesto",
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "presupuesto not found: 42");
        assert!(!err.is_user_fixable());
    }
}
