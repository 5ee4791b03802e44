//! Exchange port for balances, fee schedules, order books and order entry.
//!
//! This is the only way the core reaches exchanges. Authentication,
//! polling and transport live behind implementations of
//! [`ExchangeGateway`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{Currency, Depth, ExchangeId, OrderLeg, Rate, Symbol};
use crate::error::Result;

/// Balance of one currency as reported by an exchange.
///
/// Missing fields are reported as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct BalanceEntry {
    #[serde(default)]
    pub free: Decimal,
    #[serde(default)]
    pub used: Decimal,
    #[serde(default)]
    pub total: Decimal,
}

impl BalanceEntry {
    /// Creates an entry from all three amounts.
    #[must_use]
    pub const fn new(free: Decimal, used: Decimal, total: Decimal) -> Self {
        Self { free, used, total }
    }
}

/// Fee rates a market publishes. Either rate may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MarketFees {
    #[serde(default)]
    pub taker: Option<Rate>,
    #[serde(default)]
    pub maker: Option<Rate>,
}

/// Balances per exchange per currency.
pub type BalanceSheet = BTreeMap<ExchangeId, BTreeMap<Currency, BalanceEntry>>;

/// Market fee schedules per exchange per symbol.
pub type MarketCatalog = BTreeMap<ExchangeId, HashMap<Symbol, MarketFees>>;

/// Order book depth per exchange.
pub type BookSet = BTreeMap<ExchangeId, Depth>;

/// Unique identifier for an order on an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new `OrderId`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying ID string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Acknowledgement that an order submission call completed.
///
/// The core does not interpret fills; it only records that the call
/// returned successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAck {
    /// Exchange that accepted the order.
    pub exchange: ExchangeId,
    /// Identifier assigned by the exchange.
    pub order_id: OrderId,
}

impl OrderAck {
    /// Creates an acknowledgement.
    pub fn new(exchange: ExchangeId, order_id: impl Into<String>) -> Self {
        Self {
            exchange,
            order_id: OrderId::new(order_id),
        }
    }
}

/// Gateway to the set of exchanges traded by one bot.
///
/// Every call is awaited sequentially by the core; implementations must not
/// assume concurrent use within a cycle.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Exchanges currently active, in a stable order.
    fn current_exchanges(&self) -> Vec<ExchangeId>;

    /// Fetch balances for every active exchange.
    async fn get_balances(&self) -> Result<BalanceSheet>;

    /// Fetch market metadata, including fee rates, for every active exchange.
    async fn get_markets(&self) -> Result<MarketCatalog>;

    /// Fetch the current order book for `symbol` on every active exchange.
    async fn watch_order_books(&self, symbol: &Symbol) -> Result<BookSet>;

    /// Submit one order leg.
    async fn create_order(&self, leg: &OrderLeg) -> Result<OrderAck>;

    /// Gateway name for logging/debugging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn balance_entry_defaults_missing_fields_to_zero() {
        let entry: BalanceEntry = serde_json::from_str(r#"{"free": "1.5"}"#).unwrap();
        assert_eq!(entry, BalanceEntry::new(dec!(1.5), dec!(0), dec!(0)));
    }

    #[test]
    fn market_fees_keep_absent_rates_absent() {
        let fees: MarketFees = serde_json::from_str(r#"{"taker": 0.002}"#).unwrap();
        assert_eq!(fees.taker, Some(dec!(0.002)));
        assert_eq!(fees.maker, None);
    }

    #[test]
    fn order_ack_exposes_order_id() {
        let ack = OrderAck::new(ExchangeId::from("kucoin"), "abc-1");
        assert_eq!(ack.order_id.as_str(), "abc-1");
        assert_eq!(ack.order_id.to_string(), "abc-1");
    }
}
