//! # App Configuration
//!
//! Pricing defaults, backend endpoint and logging for the document editors.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VENTAS_EXCHANGE_RATE=1050.5                                        │
//! │     VENTAS_IIBB_PERCENT=3.5                                            │
//! │     VENTAS_BACKEND_URL=https://api.example.com                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/ventas/ventas.toml (Linux)                               │
//! │     ~/Library/Application Support/com.ventas.ventas/ventas.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     rate 0 (typed per document), IIBB 3.5, transfer 2.3, gains 15      │
//! │     backend http://localhost:3000, 30s timeout                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! default_exchange_rate = 1050.0
//!
//! [pricing.deductions]
//! iibb = 3.5
//! transf = 2.3
//! gain = 15.0
//!
//! [backend]
//! base_url = "http://localhost:3000"
//! timeout_secs = 30
//!
//! [logging]
//! filter = "info,ventas=debug"
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use ventas_core::input::parse_number;
use ventas_core::{DeductionRates, ExchangeRate};

use crate::error::{AppError, AppResult};

// =============================================================================
// Pricing Settings
// =============================================================================

/// Defaults applied when a document is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    /// ARS per USD pre-filled in new documents. Zero leaves the field for
    /// the user to type.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub default_exchange_rate: Decimal,

    /// Formal-sale deduction percentages.
    #[serde(default)]
    pub deductions: DeductionRates,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            default_exchange_rate: Decimal::ZERO,
            deductions: DeductionRates::default(),
        }
    }
}

impl PricingSettings {
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::new(self.default_exchange_rate)
    }
}

// =============================================================================
// Backend Settings
// =============================================================================

/// Where the host's `Backend` implementation sends documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the sales backend.
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing-subscriber` filter directive. `RUST_LOG` wins over it.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,ventas=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete app configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (ventas.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> AppResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| AppError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.pricing.default_exchange_rate < Decimal::ZERO {
            return Err(AppError::InvalidConfig(
                "default_exchange_rate cannot be negative".into(),
            ));
        }

        if self.backend.base_url.trim().is_empty() {
            return Err(AppError::InvalidConfig("backend.base_url is required".into()));
        }

        if self.backend.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "backend.timeout_secs must be > 0".into(),
            ));
        }

        let d = &self.pricing.deductions;
        for (name, pct) in [("iibb", d.iibb), ("transf", d.transf), ("gain", d.gain)] {
            if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(AppError::InvalidConfig(format!(
                    "deduction {} must be between 0 and 100, got {}",
                    name, pct
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(rate) = env_number("VENTAS_EXCHANGE_RATE") {
            debug!(%rate, "Overriding exchange rate from environment");
            self.pricing.default_exchange_rate = rate;
        }

        if let Some(pct) = env_number("VENTAS_IIBB_PERCENT") {
            self.pricing.deductions.iibb = pct;
        }

        if let Some(pct) = env_number("VENTAS_TRANSF_PERCENT") {
            self.pricing.deductions.transf = pct;
        }

        if let Some(pct) = env_number("VENTAS_GAIN_PERCENT") {
            self.pricing.deductions.gain = pct;
        }

        if let Ok(url) = std::env::var("VENTAS_BACKEND_URL") {
            debug!(%url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Ok(raw) = std::env::var("VENTAS_BACKEND_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => self.backend.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring invalid VENTAS_BACKEND_TIMEOUT_SECS"),
            }
        }

        if let Ok(filter) = std::env::var("VENTAS_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ventas", "ventas")
            .map(|dirs| dirs.config_dir().join("ventas.toml"))
    }
}

/// Reads a numeric environment variable, warning on garbage.
fn env_number(key: &str) -> Option<Decimal> {
    let raw = std::env::var(key).ok()?;
    let parsed = parse_number(&raw);
    if parsed.is_none() {
        warn!(key, value = %raw, "Ignoring non-numeric environment override");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pricing.default_exchange_rate, Decimal::ZERO);
        assert!(!config.pricing.exchange_rate().is_usable());
        assert_eq!(config.pricing.deductions, DeductionRates::default());
        assert_eq!(config.backend.base_url, "http://localhost:3000");
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [pricing]
            default_exchange_rate = 1050.5

            [pricing.deductions]
            iibb = 3.0
            transf = 2.3
            gain = 15.0

            [backend]
            base_url = "https://ventas.example.com/api"
            timeout_secs = 5
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "https://ventas.example.com/api");
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.pricing.default_exchange_rate, Decimal::new(10505, 1));
        assert_eq!(config.pricing.deductions.iibb, Decimal::from(3));
        assert_eq!(config.logging.filter, "info,ventas=debug");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[logging]\nfilter = \"warn\"\n").unwrap();
        assert_eq!(config.logging.filter, "warn");
        assert_eq!(config.pricing.deductions, DeductionRates::default());
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn test_backend_section_defaults_missing_keys() {
        let config: AppConfig = toml::from_str("[backend]\ntimeout_secs = 10\n").unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:3000");
        assert_eq!(config.backend.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_backend_validation() {
        let mut config = AppConfig::default();
        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.backend.timeout_secs = 1;
        assert!(config.validate().is_ok());

        config.backend.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.pricing.default_exchange_rate = Decimal::from(-1);
        assert!(config.validate().is_err());

        config.pricing.default_exchange_rate = Decimal::from(1000);
        config.pricing.deductions.gain = Decimal::from(101);
        assert!(config.validate().is_err());

        config.pricing.deductions.gain = Decimal::from(15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let path = std::env::temp_dir().join(format!(
            "ventas-config-test-{}.toml",
            std::process::id()
        ));
        let mut config = AppConfig::default();
        config.pricing.default_exchange_rate = Decimal::from(980);
        config.save(Some(path.clone())).unwrap();

        let loaded = AppConfig::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.pricing.default_exchange_rate, Decimal::from(980));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[pricing]"));
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("[logging]"));
    }
}
