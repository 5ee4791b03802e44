//! Per-exchange trading fee rates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::id::ExchangeId;
use super::money::Rate;

/// Fee rate applied when a venue publishes no schedule: 0.1%.
pub const DEFAULT_FEE_RATE: Rate = Decimal::from_parts(1, 0, 0, false, 3);

/// Taker and maker fee rates for one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Rate charged when an order takes liquidity.
    pub taker: Rate,
    /// Rate charged when an order adds liquidity.
    pub maker: Rate,
}

impl FeeSchedule {
    /// Creates a schedule from both rates.
    #[must_use]
    pub const fn new(taker: Rate, maker: Rate) -> Self {
        Self { taker, maker }
    }

    /// Builds a schedule from optional rates, defaulting each missing one.
    #[must_use]
    pub fn from_partial(taker: Option<Rate>, maker: Option<Rate>) -> Self {
        Self {
            taker: taker.unwrap_or(DEFAULT_FEE_RATE),
            maker: maker.unwrap_or(DEFAULT_FEE_RATE),
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_FEE_RATE, DEFAULT_FEE_RATE)
    }
}

/// Fee schedules for the configured symbol, keyed by exchange.
///
/// Populated once at startup and never refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeTable {
    schedules: BTreeMap<ExchangeId, FeeSchedule>,
}

impl FeeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the schedule for an exchange.
    pub fn insert(&mut self, exchange: ExchangeId, schedule: FeeSchedule) {
        self.schedules.insert(exchange, schedule);
    }

    /// Schedule for an exchange, or the 0.1% default when none was published.
    #[must_use]
    pub fn schedule(&self, exchange: &ExchangeId) -> FeeSchedule {
        self.schedules.get(exchange).copied().unwrap_or_default()
    }

    /// Taker rate for an exchange.
    #[must_use]
    pub fn taker(&self, exchange: &ExchangeId) -> Rate {
        self.schedule(exchange).taker
    }

    /// Number of exchanges with a published schedule.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Check if no schedule was published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Iterate published schedules in exchange order.
    pub fn iter(&self) -> impl Iterator<Item = (&ExchangeId, &FeeSchedule)> {
        self.schedules.iter()
    }
}
