//! Application services: balance bookkeeping, detection and orchestration.
//!
//! - [`ledger`] - Last-known balances and sufficiency queries
//! - [`detector`] - Fee-adjusted venue selection and profit
//! - [`orchestrator`] - The per-cycle state machine

pub mod detector;
pub mod ledger;
pub mod orchestrator;

pub use detector::{ArbitrageDetector, Evaluation};
pub use ledger::BalanceLedger;
pub use orchestrator::{
    BalanceShortfall, CycleOutcome, OrchestratorSettings, TradeOrchestrator, TradeReceipt,
    DEFAULT_MIN_PROFIT,
};
