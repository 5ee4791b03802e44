//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`ExchangeGateway`] - Balances, fee schedules, order books and order entry
//! - [`Notifier`] - Best-effort delivery of trade summaries

pub mod outbound;

pub use outbound::exchange::{
    BalanceEntry, BalanceSheet, BookSet, ExchangeGateway, MarketCatalog, MarketFees, OrderAck,
    OrderId,
};
pub use outbound::notifier::{LogNotifier, Notifier, NotifierRegistry, NullNotifier};
