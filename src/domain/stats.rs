//! Cumulative trade statistics.

use rust_decimal::Decimal;

use super::money::Volume;
use super::order::OrderPlan;

/// Cumulative counters for executed trades.
///
/// Lives for the lifetime of one orchestrator and is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradeStats {
    trades_count: u64,
    total_profit: Decimal,
    total_turnover: Volume,
}

impl TradeStats {
    /// Creates zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of executed trades.
    #[must_use]
    pub const fn trades_count(&self) -> u64 {
        self.trades_count
    }

    /// Sum of detection-time profit over executed trades.
    #[must_use]
    pub const fn total_profit(&self) -> Decimal {
        self.total_profit
    }

    /// Sum of both legs' amounts over executed trades.
    #[must_use]
    pub const fn total_turnover(&self) -> Volume {
        self.total_turnover
    }

    /// Account for one executed plan.
    pub fn record(&mut self, plan: &OrderPlan) {
        self.trades_count += 1;
        self.total_profit += plan.report().profit();
        self.total_turnover += plan.turnover();
    }
}
