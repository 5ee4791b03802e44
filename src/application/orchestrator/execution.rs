//! Order submission, bookkeeping and the trade summary.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::TradeOrchestrator;
use crate::domain::{OrderPlan, TradeStats};
use crate::error::{ExecutionError, Result};
use crate::port::OrderAck;

/// Record of an executed plan.
#[derive(Debug, Clone)]
pub struct TradeReceipt {
    /// The executed plan.
    pub plan: OrderPlan,
    /// One acknowledgement per leg, buy first.
    pub acks: Vec<OrderAck>,
    /// Statistics after this trade.
    pub stats: TradeStats,
    /// Summary text sent to the notifier.
    pub summary: String,
    /// Whether the notifier reported successful delivery.
    pub notified: bool,
    /// When both legs were submitted.
    pub executed_at: DateTime<Utc>,
}

impl TradeOrchestrator {
    /// Submit both legs, update statistics and send the summary.
    ///
    /// Legs go out one after the other, buy first. There is no rollback:
    /// if the sell leg fails after the buy leg was accepted, the error
    /// carries the accepted leg and no compensating order is sent.
    /// Statistics are only updated once both submissions returned.
    pub async fn execute(&mut self, plan: OrderPlan) -> Result<TradeReceipt> {
        let mut acks = Vec::with_capacity(2);
        let mut completed_legs = Vec::with_capacity(2);

        for leg in plan.legs() {
            info!(
                order_type = %leg.order_type(),
                side = %leg.side(),
                amount = %leg.amount(),
                symbol = %leg.symbol(),
                price = %leg.price(),
                exchange = %leg.exchange(),
                "Placing order"
            );
            match self.gateway.create_order(leg).await {
                Ok(ack) => {
                    completed_legs.push(leg.clone());
                    acks.push(ack);
                }
                Err(e) => {
                    error!(
                        error = %e,
                        exchange = %leg.exchange(),
                        side = %leg.side(),
                        completed = completed_legs.len(),
                        "Order placement failed"
                    );
                    return Err(ExecutionError::OrderPlacementFailed {
                        exchange: leg.exchange().clone(),
                        side: leg.side(),
                        completed_legs,
                        reason: e.to_string(),
                    }
                    .into());
                }
            }
        }

        self.stats.record(&plan);
        let summary = self.summary(&plan);

        let notified = match self.notifier.send_message(&summary).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, notifier = self.notifier.name(), "Failed to deliver trade summary");
                false
            }
        };

        info!(
            trades = self.stats.trades_count(),
            total_profit = %self.stats.total_profit(),
            total_turnover = %self.stats.total_turnover(),
            "Trade executed"
        );

        Ok(TradeReceipt {
            plan,
            acks,
            stats: self.stats,
            summary,
            notified,
            executed_at: Utc::now(),
        })
    }

    /// Human-readable summary of an executed plan.
    ///
    /// Aggregate balances come from the ledger snapshot taken at the start
    /// of the cycle.
    #[must_use]
    pub fn summary(&self, plan: &OrderPlan) -> String {
        let symbol = &self.settings.symbol;
        let report = plan.report();
        let mut lines = vec![format!("Arbitrage executed for {symbol}")];

        for leg in plan.legs() {
            lines.push(format!(
                "{} {} {} @ {} on {}",
                leg.side(),
                leg.amount(),
                symbol.counter(),
                leg.price(),
                leg.exchange()
            ));
        }

        lines.push(format!(
            "Profit: {:.5} {} ({:.6}), fees {}",
            report.display_profit(),
            symbol.base(),
            report.display_profit_pct(),
            report.fees()
        ));
        lines.push(format!(
            "Total profit: {} {} | Trades: {} | Turnover: {} {}",
            self.stats.total_profit(),
            symbol.base(),
            self.stats.trades_count(),
            self.stats.total_turnover(),
            symbol.counter()
        ));
        lines.push(format!(
            "Balances: {} {} | {} {}",
            self.ledger.get_total_currency(symbol.counter()),
            symbol.counter(),
            self.ledger.get_total_currency(symbol.base()),
            symbol.base()
        ));

        lines.join("\n")
    }
}
