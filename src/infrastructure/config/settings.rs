//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the Telegram credentials (`TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`).
//!
//! # Example
//!
//! ```no_run
//! use ceres::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

use super::logging::LoggingConfig;
use super::paper::PaperConfig;
use super::telegram::TelegramAppConfig;
use crate::application::{OrchestratorSettings, DEFAULT_MIN_PROFIT};
use crate::domain::Symbol;
use crate::error::{ConfigError, Result};

const fn default_min_profit() -> Decimal {
    DEFAULT_MIN_PROFIT
}

/// Main application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Simulation mode. The ledger starts empty and the paper venue is used.
    #[serde(default)]
    pub dry: bool,

    /// Trading pair as `COUNTER/BASE`. Required.
    #[serde(default)]
    pub symbol: Option<String>,

    /// Minimum profit, in the base currency, a plan must exceed.
    #[serde(default = "default_min_profit")]
    pub min_profit: Decimal,

    /// Size of each leg in the counter currency. Required.
    #[serde(default)]
    pub order_size: Option<Decimal>,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Simulated venues for dry mode.
    #[serde(default)]
    pub paper: PaperConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Telegram credentials from the environment take precedence over the
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            config.telegram.token = Some(token);
        }
        if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") {
            let chat_id = chat_id.parse().map_err(|_| ConfigError::InvalidValue {
                field: "TELEGRAM_CHAT_ID",
                reason: format!("'{chat_id}' is not an integer chat id"),
            })?;
            config.telegram.chat_id = Some(chat_id);
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.symbol()?;

        if self.order_size()? <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "order_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.min_profit < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_profit",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        self.telegram.validate()?;
        self.paper.validate()?;

        Ok(())
    }

    /// The configured trading pair.
    ///
    /// # Errors
    ///
    /// `MissingField` when absent, `InvalidValue` when not `COUNTER/BASE`.
    #[allow(clippy::result_large_err)]
    pub fn symbol(&self) -> Result<Symbol> {
        let raw = self
            .symbol
            .as_deref()
            .ok_or(ConfigError::MissingField { field: "symbol" })?;
        raw.parse().map_err(|e: crate::domain::DomainError| {
            ConfigError::InvalidValue {
                field: "symbol",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// The configured leg size.
    ///
    /// # Errors
    ///
    /// `MissingField` when absent.
    #[allow(clippy::result_large_err)]
    pub fn order_size(&self) -> Result<Decimal> {
        Ok(self
            .order_size
            .ok_or(ConfigError::MissingField { field: "order_size" })?)
    }

    /// Orchestrator parameters derived from this configuration.
    #[allow(clippy::result_large_err)]
    pub fn orchestrator_settings(&self) -> Result<OrchestratorSettings> {
        Ok(OrchestratorSettings {
            symbol: self.symbol()?,
            order_size: self.order_size()?,
            min_profit: self.min_profit,
            dry: self.dry,
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    const MINIMAL: &str = r#"
symbol = "EVER/USDT"
order_size = 20
"#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse_toml(MINIMAL).unwrap();

        assert!(!config.dry);
        assert_eq!(config.min_profit, dec!(0.005));
        assert_eq!(config.order_size().unwrap(), dec!(20));
        assert_eq!(config.symbol().unwrap(), Symbol::new("EVER", "USDT"));
        assert_eq!(config.logging.level, "info");
        assert!(!config.telegram.enabled);
        assert!(config.paper.exchanges.is_empty());
    }

    #[test]
    fn settings_carry_all_trading_parameters() {
        let config = Config::parse_toml(
            r#"
dry = true
symbol = "BTC/USDT"
order_size = 0.5
min_profit = 1.25
"#,
        )
        .unwrap();

        let settings = config.orchestrator_settings().unwrap();
        assert_eq!(settings.symbol.to_string(), "BTC/USDT");
        assert_eq!(settings.order_size, dec!(0.5));
        assert_eq!(settings.min_profit, dec!(1.25));
        assert!(settings.dry);
    }

    #[test]
    fn missing_symbol_is_rejected() {
        let result = Config::parse_toml("order_size = 20");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "symbol" }))
        ));
    }

    #[test]
    fn malformed_symbol_is_rejected() {
        let result = Config::parse_toml("symbol = \"EVERUSDT\"\norder_size = 20");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "symbol", .. }))
        ));
    }

    #[test]
    fn non_positive_order_size_is_rejected() {
        let result = Config::parse_toml("symbol = \"EVER/USDT\"\norder_size = 0");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "order_size", .. }))
        ));
    }

    #[test]
    fn negative_min_profit_is_rejected() {
        let result =
            Config::parse_toml("symbol = \"EVER/USDT\"\norder_size = 1\nmin_profit = -0.1");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "min_profit", .. }))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::parse_toml("symbol = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
