//! Exchange-agnostic domain types.
//!
//! - [`id`] - Exchange, currency and symbol identifiers
//! - [`money`] - Decimal price, volume and rate aliases
//! - [`balance`] - Per-currency balance snapshots
//! - [`book`] - Best quotes and deterministic venue selection
//! - [`fee`] - Per-exchange fee schedules
//! - [`order`] - Order legs, plans and profit reports
//! - [`stats`] - Cumulative trade statistics

pub mod balance;
pub mod book;
pub mod error;
pub mod fee;
pub mod id;
pub mod money;
pub mod order;
pub mod stats;

pub use balance::Asset;
pub use book::{Depth, OrderBookSnapshot, PriceLevel, Quote};
pub use error::DomainError;
pub use fee::{FeeSchedule, FeeTable, DEFAULT_FEE_RATE};
pub use id::{Currency, ExchangeId, Symbol};
pub use money::{Price, Rate, Volume};
pub use order::{OrderLeg, OrderPlan, OrderSide, OrderType, ProfitReport};
pub use stats::TradeStats;
