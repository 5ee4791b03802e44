//! Trade orchestration: one detection → validation → execution → report
//! pass per external trigger.
//!
//! ```text
//! IDLE → DETECTING ─┬─ NO_OPPORTUNITY → IDLE
//!                   └─ OPPORTUNITY_FOUND → VALIDATING ─┬─ INSUFFICIENT → IDLE
//!                                                      └─ EXECUTING → REPORTING → IDLE
//! ```
//!
//! The orchestrator never schedules itself. Callers drive cycles, and
//! `main_cycle` takes `&mut self` so two cycles on one instance cannot
//! overlap. Ledger and statistics belong to the instance, so several
//! orchestrators (one per symbol) can run side by side.

mod execution;
mod validation;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::application::detector::ArbitrageDetector;
use crate::application::ledger::BalanceLedger;
use crate::domain::{OrderPlan, Symbol, TradeStats, Volume};
use crate::error::Result;
use crate::port::{ExchangeGateway, Notifier};

pub use execution::TradeReceipt;
pub use validation::{requirement, validate_balance, BalanceShortfall};

/// Default minimum profit, in the base currency, required to trade.
pub const DEFAULT_MIN_PROFIT: Decimal = Decimal::from_parts(5, 0, 0, false, 3);

/// Parameters of one orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Traded symbol.
    pub symbol: Symbol,
    /// Size of each leg in the counter currency.
    pub order_size: Volume,
    /// Plans must exceed this profit to execute.
    pub min_profit: Decimal,
    /// Simulation mode: start from an empty ledger.
    pub dry: bool,
}

/// How a cycle ended.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// The spread did not cover both taker fees.
    NoOpportunity,
    /// Profitable, but not above the configured minimum.
    BelowThreshold {
        /// The plan that was not executed.
        plan: OrderPlan,
    },
    /// At least one leg lacks free balance.
    InsufficientBalance {
        /// The plan that was not executed.
        plan: OrderPlan,
        /// Every leg that failed the check.
        shortfalls: Vec<BalanceShortfall>,
    },
    /// Both legs were submitted.
    Executed(TradeReceipt),
}

impl CycleOutcome {
    /// Check if both legs were submitted.
    #[must_use]
    pub const fn is_executed(&self) -> bool {
        matches!(self, Self::Executed(_))
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoOpportunity => "no_opportunity",
            Self::BelowThreshold { .. } => "below_threshold",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::Executed(_) => "executed",
        }
    }
}

/// Drives arbitrage cycles for one symbol.
pub struct TradeOrchestrator {
    settings: OrchestratorSettings,
    gateway: Arc<dyn ExchangeGateway>,
    notifier: Arc<dyn Notifier>,
    ledger: BalanceLedger,
    detector: ArbitrageDetector,
    stats: TradeStats,
}

impl TradeOrchestrator {
    /// Load fees and the initial ledger, then return a ready orchestrator.
    ///
    /// In dry mode the ledger starts empty; otherwise balances are fetched.
    pub async fn start(
        settings: OrchestratorSettings,
        gateway: Arc<dyn ExchangeGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        if settings.dry {
            info!("Bot is running in dry mode");
        }

        let ledger = if settings.dry {
            BalanceLedger::new()
        } else {
            BalanceLedger::load(gateway.as_ref()).await?
        };

        let detector = ArbitrageDetector::load(
            settings.symbol.clone(),
            settings.order_size,
            gateway.as_ref(),
        )
        .await?;

        info!(
            symbol = %settings.symbol,
            order_size = %settings.order_size,
            min_profit = %settings.min_profit,
            gateway = gateway.name(),
            notifier = notifier.name(),
            "Orchestrator started"
        );

        Ok(Self::with_parts(settings, gateway, notifier, ledger, detector))
    }

    /// Assemble an orchestrator from already built parts.
    #[must_use]
    pub fn with_parts(
        settings: OrchestratorSettings,
        gateway: Arc<dyn ExchangeGateway>,
        notifier: Arc<dyn Notifier>,
        ledger: BalanceLedger,
        detector: ArbitrageDetector,
    ) -> Self {
        Self {
            settings,
            gateway,
            notifier,
            ledger,
            detector,
            stats: TradeStats::new(),
        }
    }

    /// Run one full cycle.
    ///
    /// Market data, balance and order placement failures propagate to the
    /// caller. Insufficient balance and missing opportunities are normal
    /// outcomes.
    pub async fn main_cycle(&mut self) -> Result<CycleOutcome> {
        self.ledger.refresh(self.gateway.as_ref()).await?;

        let Some(plan) = self
            .detector
            .check_opportunity(self.gateway.as_ref())
            .await?
        else {
            debug!(symbol = %self.settings.symbol, "No opportunity");
            return Ok(CycleOutcome::NoOpportunity);
        };

        if plan.report().profit() <= self.settings.min_profit {
            info!(
                profit = %plan.report().profit(),
                min_profit = %self.settings.min_profit,
                "Profit below threshold, skipping"
            );
            return Ok(CycleOutcome::BelowThreshold { plan });
        }

        let shortfalls = self.validate_balance(&plan);
        if !shortfalls.is_empty() {
            for shortfall in &shortfalls {
                warn!(
                    exchange = %shortfall.exchange,
                    currency = %shortfall.currency,
                    required = %shortfall.required,
                    available = %shortfall.available,
                    "Balance not enough"
                );
            }
            return Ok(CycleOutcome::InsufficientBalance { plan, shortfalls });
        }

        info!(
            buy = %plan.buy(),
            sell = %plan.sell(),
            profit = %plan.report().display_profit(),
            "Creating orders now"
        );
        let receipt = self.execute(plan).await?;
        Ok(CycleOutcome::Executed(receipt))
    }

    /// Check both legs of `plan` against the current ledger snapshot.
    #[must_use]
    pub fn validate_balance(&self, plan: &OrderPlan) -> Vec<BalanceShortfall> {
        validate_balance(&self.ledger, plan)
    }

    /// Settings this orchestrator was built with.
    #[must_use]
    pub const fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    /// Cumulative statistics.
    #[must_use]
    pub const fn stats(&self) -> &TradeStats {
        &self.stats
    }

    /// Current balance ledger.
    #[must_use]
    pub const fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// The detector and its last snapshot.
    #[must_use]
    pub const fn detector(&self) -> &ArbitrageDetector {
        &self.detector
    }
}
