//! Simulated venues used in dry mode.
//!
//! ```toml
//! [paper.exchanges.kucoin]
//! bid = 0.06670
//! ask = 0.06682
//! taker = 0.001
//!
//! [paper.exchanges.kucoin.balances]
//! USDT = 100
//! EVER = 500
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{Currency, ExchangeId, Price, Rate};
use crate::error::{ConfigError, Result};

/// All simulated venues, keyed by exchange id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperConfig {
    #[serde(default)]
    pub exchanges: BTreeMap<ExchangeId, PaperVenueConfig>,
}

/// One simulated venue with a static top of book.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperVenueConfig {
    pub bid: Price,
    pub ask: Price,
    /// Missing rates fall back to the default fee rate.
    #[serde(default)]
    pub taker: Option<Rate>,
    #[serde(default)]
    pub maker: Option<Rate>,
    /// Starting free balances.
    #[serde(default)]
    pub balances: BTreeMap<Currency, Decimal>,
}

impl PaperConfig {
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        for (exchange, venue) in &self.exchanges {
            if venue.bid <= Decimal::ZERO || venue.ask <= Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "paper.exchanges",
                    reason: format!("{exchange}: bid and ask must be greater than 0"),
                }
                .into());
            }
            let negative_rate = [venue.taker, venue.maker]
                .into_iter()
                .flatten()
                .any(|rate| rate < Decimal::ZERO);
            if negative_rate {
                return Err(ConfigError::InvalidValue {
                    field: "paper.exchanges",
                    reason: format!("{exchange}: fee rates must be 0 or greater"),
                }
                .into());
            }
        }
        Ok(())
    }
}
