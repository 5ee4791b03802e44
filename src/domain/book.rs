//! Order book types for best-price representation across exchanges.
//!
//! - [`PriceLevel`] - A single price level with size
//! - [`Depth`] - Bids and asks for one exchange as reported by the venue
//! - [`Quote`] - Best bid and best ask for one exchange
//! - [`OrderBookSnapshot`] - Best quotes for every active exchange
//!
//! # Venue Selection
//!
//! The snapshot picks the cheapest ask and the richest bid with an
//! explicit comparator: price first, then exchange identifier ascending.
//! Equal prices therefore always resolve to the same venue.
//!
//! ```
//! use ceres::domain::book::{OrderBookSnapshot, Quote};
//! use ceres::domain::id::ExchangeId;
//! use rust_decimal_macros::dec;
//!
//! let mut snapshot = OrderBookSnapshot::new();
//! snapshot.insert(ExchangeId::new("kucoin"), Quote::new(dec!(0.0667), dec!(0.06682)));
//! snapshot.insert(ExchangeId::new("bybit"), Quote::new(dec!(0.06707), dec!(0.0672)));
//!
//! let (buy_on, ask) = snapshot.lowest_ask().unwrap();
//! let (sell_on, bid) = snapshot.highest_bid().unwrap();
//! assert_eq!(buy_on.as_str(), "kucoin");
//! assert_eq!(ask, dec!(0.06682));
//! assert_eq!(sell_on.as_str(), "bybit");
//! assert_eq!(bid, dec!(0.06707));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::id::ExchangeId;
use super::money::{Price, Volume};

/// A single price level in an order book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLevel {
    price: Price,
    size: Volume,
}

impl PriceLevel {
    /// Creates a new price level.
    #[must_use]
    pub const fn new(price: Price, size: Volume) -> Self {
        Self { price, size }
    }

    /// Returns the price at this level.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Returns the size available at this level.
    #[must_use]
    pub const fn size(&self) -> Volume {
        self.size
    }
}

/// Order book depth for one exchange, best level first on each side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Depth {
    /// Buy orders, sorted by price descending.
    pub bids: Vec<PriceLevel>,
    /// Sell orders, sorted by price ascending.
    pub asks: Vec<PriceLevel>,
}

impl Depth {
    /// Creates depth from both sides.
    #[must_use]
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self { bids, asks }
    }

    /// Best (first) bid level.
    #[must_use]
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    /// Best (first) ask level.
    #[must_use]
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

/// Best bid and best ask for one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    bid: Price,
    ask: Price,
}

impl Quote {
    /// Creates a new quote.
    #[must_use]
    pub const fn new(bid: Price, ask: Price) -> Self {
        Self { bid, ask }
    }

    /// Best bid price.
    #[must_use]
    pub const fn bid(&self) -> Price {
        self.bid
    }

    /// Best ask price.
    #[must_use]
    pub const fn ask(&self) -> Price {
        self.ask
    }
}

/// Best quotes per exchange for the configured symbol.
///
/// Replaced wholesale every detection cycle; no history is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBookSnapshot {
    quotes: BTreeMap<ExchangeId, Quote>,
}

impl OrderBookSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the quote for an exchange, replacing any previous one.
    pub fn insert(&mut self, exchange: ExchangeId, quote: Quote) {
        self.quotes.insert(exchange, quote);
    }

    /// Quote for a single exchange.
    #[must_use]
    pub fn get(&self, exchange: &ExchangeId) -> Option<&Quote> {
        self.quotes.get(exchange)
    }

    /// Number of exchanges quoted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Check if no exchange is quoted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterate quotes in exchange order.
    pub fn iter(&self) -> impl Iterator<Item = (&ExchangeId, &Quote)> {
        self.quotes.iter()
    }

    /// Exchange with the lowest ask. Ties go to the smallest exchange id.
    #[must_use]
    pub fn lowest_ask(&self) -> Option<(&ExchangeId, Price)> {
        self.quotes
            .iter()
            .map(|(exchange, quote)| (exchange, quote.ask()))
            .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
    }

    /// Exchange with the highest bid. Ties go to the smallest exchange id.
    #[must_use]
    pub fn highest_bid(&self) -> Option<(&ExchangeId, Price)> {
        self.quotes
            .iter()
            .map(|(exchange, quote)| (exchange, quote.bid()))
            .min_by(|a, b| descending_price(a.1, b.1).then_with(|| a.0.cmp(b.0)))
    }
}

fn descending_price(a: Price, b: Price) -> Ordering {
    b.cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot(entries: &[(&str, Price, Price)]) -> OrderBookSnapshot {
        let mut snapshot = OrderBookSnapshot::new();
        for (exchange, bid, ask) in entries {
            snapshot.insert(ExchangeId::from(*exchange), Quote::new(*bid, *ask));
        }
        snapshot
    }

    #[test]
    fn depth_best_levels_are_first_entries() {
        let depth = Depth::new(
            vec![
                PriceLevel::new(dec!(0.45), dec!(100)),
                PriceLevel::new(dec!(0.44), dec!(200)),
            ],
            vec![PriceLevel::new(dec!(0.46), dec!(150))],
        );

        assert_eq!(depth.best_bid().unwrap().price(), dec!(0.45));
        assert_eq!(depth.best_ask().unwrap().price(), dec!(0.46));
        assert!(Depth::default().best_bid().is_none());
    }

    #[test]
    fn empty_snapshot_has_no_venues() {
        let snapshot = OrderBookSnapshot::new();
        assert!(snapshot.is_empty());
        assert!(snapshot.lowest_ask().is_none());
        assert!(snapshot.highest_bid().is_none());
    }

    #[test]
    fn price_ties_resolve_to_smallest_exchange_id() {
        let snapshot = snapshot(&[
            ("okx", dec!(1.10), dec!(1.20)),
            ("binance", dec!(1.10), dec!(1.20)),
            ("kraken", dec!(1.10), dec!(1.20)),
        ]);

        assert_eq!(snapshot.lowest_ask().unwrap().0.as_str(), "binance");
        assert_eq!(snapshot.highest_bid().unwrap().0.as_str(), "binance");
    }

    #[test]
    fn selection_prefers_price_over_exchange_order() {
        let snapshot = snapshot(&[
            ("aaa", dec!(1.00), dec!(1.30)),
            ("zzz", dec!(1.25), dec!(1.10)),
        ]);

        assert_eq!(snapshot.lowest_ask().unwrap(), (&ExchangeId::from("zzz"), dec!(1.10)));
        assert_eq!(snapshot.highest_bid().unwrap(), (&ExchangeId::from("zzz"), dec!(1.25)));
    }

    #[test]
    fn insert_replaces_existing_quote() {
        let mut snapshot = snapshot(&[("bybit", dec!(1), dec!(2))]);
        snapshot.insert(ExchangeId::from("bybit"), Quote::new(dec!(3), dec!(4)));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(&ExchangeId::from("bybit")).unwrap().bid(), dec!(3));
    }
}
