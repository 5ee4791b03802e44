//! Ceres - cross-exchange spot arbitrage for a single trading pair.
//!
//! Each cycle refreshes balances, pulls the top of book from every venue,
//! buys where the ask is lowest, sells where the bid is highest, and only
//! trades when the spread pays both taker fees and clears a profit threshold.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Exchange-agnostic types: identifiers, quotes, fees, plans
//! - [`port`] - Traits the core talks through (`ExchangeGateway`, `Notifier`)
//! - [`application`] - `BalanceLedger`, `ArbitrageDetector`, `TradeOrchestrator`
//! - [`adapter`] - Paper exchange and Telegram notifier
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`cli`] - Command-line entry points
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Deliver trade summaries to a Telegram chat
//! - `testkit` - Expose scripted gateways and notifiers to integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ceres::adapter::outbound::paper::PaperExchange;
//! use ceres::application::{OrchestratorSettings, TradeOrchestrator};
//! use ceres::domain::{ExchangeId, Quote, Symbol};
//! use ceres::port::{LogNotifier, MarketFees};
//! use rust_decimal_macros::dec;
//!
//! # async fn demo() -> ceres::error::Result<()> {
//! let symbol = Symbol::new("EVER", "USDT");
//! let gateway = PaperExchange::new(symbol.clone())
//!     .with_venue(ExchangeId::from("kucoin"), Quote::new(dec!(0.06670), dec!(0.06682)), MarketFees::default())
//!     .with_venue(ExchangeId::from("bybit"), Quote::new(dec!(0.06707), dec!(0.06720)), MarketFees::default());
//!
//! let settings = OrchestratorSettings {
//!     symbol,
//!     order_size: dec!(20),
//!     min_profit: dec!(0.001),
//!     dry: true,
//! };
//! let mut orchestrator =
//!     TradeOrchestrator::start(settings, Arc::new(gateway), Arc::new(LogNotifier)).await?;
//! let outcome = orchestrator.main_cycle().await?;
//! println!("{}", outcome.label());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
