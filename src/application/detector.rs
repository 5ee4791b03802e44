//! Cross-exchange spot arbitrage detection.
//!
//! Each check pulls a fresh order book snapshot, buys on the exchange with
//! the lowest ask, sells on the exchange with the highest bid, and charges
//! the taker fee of each venue on its leg:
//!
//! ```text
//! fee(leg) = order_size * price * taker_rate
//! profit   = (max_bid - min_ask) * order_size - (fee(buy) + fee(sell))
//! ```
//!
//! A plan is emitted only when `profit > 0`.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{
    DomainError, ExchangeId, FeeSchedule, FeeTable, OrderBookSnapshot, OrderLeg, OrderPlan,
    OrderSide, Price, ProfitReport, Quote, Symbol, Volume,
};
use crate::error::{MarketDataError, Result};
use crate::port::{ExchangeGateway, MarketCatalog};

/// Outcome of pricing the best buy/sell venue pair, profitable or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Exchange with the lowest ask.
    pub buy_exchange: ExchangeId,
    /// Lowest ask price.
    pub buy_price: Price,
    /// Taker fee paid on the buy leg.
    pub buy_fee: Decimal,
    /// Exchange with the highest bid.
    pub sell_exchange: ExchangeId,
    /// Highest bid price.
    pub sell_price: Price,
    /// Taker fee paid on the sell leg.
    pub sell_fee: Decimal,
    /// Net profit after both fees.
    pub report: ProfitReport,
}

impl Evaluation {
    /// Check if the spread covers both fees.
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.report.profit() > Decimal::ZERO
    }
}

/// Finds the best buy/sell venue pair for one symbol.
#[derive(Debug, Clone)]
pub struct ArbitrageDetector {
    symbol: Symbol,
    order_size: Volume,
    fees: FeeTable,
    snapshot: OrderBookSnapshot,
}

impl ArbitrageDetector {
    /// Creates a detector with an already known fee table.
    #[must_use]
    pub fn new(symbol: Symbol, order_size: Volume, fees: FeeTable) -> Self {
        Self {
            symbol,
            order_size,
            fees,
            snapshot: OrderBookSnapshot::new(),
        }
    }

    /// Creates a detector, reading fee schedules from the exchanges once.
    pub async fn load(
        symbol: Symbol,
        order_size: Volume,
        gateway: &dyn ExchangeGateway,
    ) -> Result<Self> {
        let catalog = gateway.get_markets().await?;
        let fees = fee_table(&catalog, &symbol);
        info!(
            symbol = %symbol,
            fees = ?fees,
            "Fees per exchange"
        );
        Ok(Self::new(symbol, order_size, fees))
    }

    /// Traded symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Configured size of each leg.
    #[must_use]
    pub const fn order_size(&self) -> Volume {
        self.order_size
    }

    /// Fee table loaded at startup.
    #[must_use]
    pub const fn fees(&self) -> &FeeTable {
        &self.fees
    }

    /// Snapshot used by the most recent check.
    #[must_use]
    pub const fn snapshot(&self) -> &OrderBookSnapshot {
        &self.snapshot
    }

    /// Refresh the order books and look for a profitable plan.
    ///
    /// Returns `Ok(None)` when the spread does not cover both taker fees.
    pub async fn check_opportunity(
        &mut self,
        gateway: &dyn ExchangeGateway,
    ) -> Result<Option<OrderPlan>> {
        self.snapshot = self.fetch_snapshot(gateway).await?;

        let Some(evaluation) = self.evaluate(&self.snapshot)? else {
            return Ok(None);
        };

        debug!(
            symbol = %self.symbol,
            profit = %evaluation.report.profit(),
            buy_exchange = %evaluation.buy_exchange,
            buy_price = %evaluation.buy_price,
            sell_exchange = %evaluation.sell_exchange,
            sell_price = %evaluation.sell_price,
            "Profit after fees"
        );

        if !evaluation.is_profitable() {
            return Ok(None);
        }

        info!(
            symbol = %self.symbol,
            buy_exchange = %evaluation.buy_exchange,
            sell_exchange = %evaluation.sell_exchange,
            profit = %evaluation.report.display_profit(),
            "Found arbitrage opportunity"
        );
        Ok(Some(self.plan(evaluation)))
    }

    /// Price the best venue pair in `snapshot`.
    ///
    /// Returns `Ok(None)` only for an empty snapshot.
    ///
    /// # Errors
    ///
    /// [`DomainError::Overflow`] when a fee or the profit does not fit in a
    /// `Decimal`.
    pub fn evaluate(&self, snapshot: &OrderBookSnapshot) -> Result<Option<Evaluation>> {
        let Some((buy_exchange, buy_price)) = snapshot.lowest_ask() else {
            return Ok(None);
        };
        let Some((sell_exchange, sell_price)) = snapshot.highest_bid() else {
            return Ok(None);
        };

        let buy_fee = self.leg_fee(buy_exchange, buy_price)?;
        let sell_fee = self.leg_fee(sell_exchange, sell_price)?;
        let fees = checked(buy_fee.checked_add(sell_fee), "fees")?;

        let spread = checked(sell_price.checked_sub(buy_price), "spread")?;
        let gross = checked(spread.checked_mul(self.order_size), "profit")?;
        let profit = checked(gross.checked_sub(fees), "profit")?;

        Ok(Some(Evaluation {
            buy_exchange: buy_exchange.clone(),
            buy_price,
            buy_fee,
            sell_exchange: sell_exchange.clone(),
            sell_price,
            sell_fee,
            report: ProfitReport::new(profit, fees),
        }))
    }

    fn leg_fee(&self, exchange: &ExchangeId, price: Price) -> Result<Decimal> {
        let notional = checked(self.order_size.checked_mul(price), "fee")?;
        checked(notional.checked_mul(self.fees.taker(exchange)), "fee")
    }

    fn plan(&self, evaluation: Evaluation) -> OrderPlan {
        OrderPlan::new(
            OrderLeg::limit(
                evaluation.buy_exchange,
                self.symbol.clone(),
                OrderSide::Buy,
                self.order_size,
                evaluation.buy_price,
            ),
            OrderLeg::limit(
                evaluation.sell_exchange,
                self.symbol.clone(),
                OrderSide::Sell,
                self.order_size,
                evaluation.sell_price,
            ),
            evaluation.report,
        )
    }

    async fn fetch_snapshot(&self, gateway: &dyn ExchangeGateway) -> Result<OrderBookSnapshot> {
        let exchanges = gateway.current_exchanges();
        if exchanges.is_empty() {
            return Err(MarketDataError::NoExchanges.into());
        }

        let books = gateway.watch_order_books(&self.symbol).await?;

        let mut snapshot = OrderBookSnapshot::new();
        for exchange in exchanges {
            let depth = books
                .get(&exchange)
                .ok_or_else(|| MarketDataError::MissingBook {
                    exchange: exchange.clone(),
                })?;
            let bid = depth.best_bid().ok_or_else(|| MarketDataError::EmptySide {
                exchange: exchange.clone(),
                side: "bid",
            })?;
            let ask = depth.best_ask().ok_or_else(|| MarketDataError::EmptySide {
                exchange: exchange.clone(),
                side: "ask",
            })?;
            snapshot.insert(exchange, Quote::new(bid.price(), ask.price()));
        }
        Ok(snapshot)
    }
}

fn checked(value: Option<Decimal>, quantity: &'static str) -> Result<Decimal> {
    value.ok_or_else(|| DomainError::Overflow { quantity }.into())
}

/// Fee schedules for `symbol`. Exchanges that do not list the symbol are
/// left out and priced at the default rate.
fn fee_table(catalog: &MarketCatalog, symbol: &Symbol) -> FeeTable {
    let mut fees = FeeTable::new();
    for (exchange, markets) in catalog {
        if let Some(market) = markets.get(symbol) {
            fees.insert(
                exchange.clone(),
                FeeSchedule::from_partial(market.taker, market.maker),
            );
        }
    }
    fees
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::port::MarketFees;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn symbol() -> Symbol {
        Symbol::new("EVER", "USDT")
    }

    fn snapshot(entries: &[(&str, Price, Price)]) -> OrderBookSnapshot {
        let mut snapshot = OrderBookSnapshot::new();
        for (exchange, bid, ask) in entries {
            snapshot.insert(ExchangeId::from(*exchange), Quote::new(*bid, *ask));
        }
        snapshot
    }

    #[test]
    fn evaluates_reference_spread() {
        let detector = ArbitrageDetector::new(symbol(), dec!(20), FeeTable::new());
        let snapshot = snapshot(&[
            ("kucoin", dec!(0.06670), dec!(0.06682)),
            ("bybit", dec!(0.06707), dec!(0.06720)),
        ]);

        let evaluation = detector.evaluate(&snapshot).unwrap().unwrap();

        assert_eq!(evaluation.buy_exchange.as_str(), "kucoin");
        assert_eq!(evaluation.sell_exchange.as_str(), "bybit");
        assert_eq!(evaluation.buy_fee, dec!(0.0013364));
        assert_eq!(evaluation.sell_fee, dec!(0.0013414));
        assert_eq!(evaluation.report.profit(), dec!(0.0023222));
        assert_eq!(evaluation.report.fees(), dec!(0.0026778));
        assert_eq!(evaluation.report.display_profit().to_string(), "0.00232");
        assert!(evaluation.is_profitable());
    }

    #[test]
    fn spread_below_fees_is_unprofitable() {
        let detector = ArbitrageDetector::new(symbol(), dec!(20), FeeTable::new());
        let snapshot = snapshot(&[
            ("kucoin", dec!(0.06670), dec!(0.06682)),
            ("bybit", dec!(0.06690), dec!(0.06720)),
        ]);

        let evaluation = detector.evaluate(&snapshot).unwrap().unwrap();
        assert!(evaluation.report.profit() < Decimal::ZERO);
        assert!(!evaluation.is_profitable());
    }

    #[test]
    fn uses_each_venue_taker_rate() {
        let mut fees = FeeTable::new();
        fees.insert(ExchangeId::from("kucoin"), FeeSchedule::new(dec!(0), dec!(0)));
        fees.insert(ExchangeId::from("bybit"), FeeSchedule::new(dec!(0.002), dec!(0)));
        let detector = ArbitrageDetector::new(symbol(), dec!(10), fees);

        let evaluation = detector
            .evaluate(&snapshot(&[
                ("kucoin", dec!(0.9), dec!(1.0)),
                ("bybit", dec!(1.1), dec!(1.2)),
            ]))
            .unwrap()
            .unwrap();

        assert_eq!(evaluation.buy_fee, dec!(0));
        assert_eq!(evaluation.sell_fee, dec!(0.022));
        assert_eq!(evaluation.report.profit(), dec!(0.978));
    }

    #[test]
    fn empty_snapshot_has_no_evaluation() {
        let detector = ArbitrageDetector::new(symbol(), dec!(20), FeeTable::new());
        assert!(detector.evaluate(&OrderBookSnapshot::new()).unwrap().is_none());
    }

    #[test]
    fn oversized_order_is_an_overflow_error() {
        let detector = ArbitrageDetector::new(symbol(), Decimal::MAX, FeeTable::new());
        let snapshot = snapshot(&[
            ("kucoin", dec!(0.9), dec!(1000)),
            ("bybit", dec!(2000), dec!(2100)),
        ]);

        let result = detector.evaluate(&snapshot);

        assert!(matches!(
            result,
            Err(Error::Domain(DomainError::Overflow { quantity: "fee" }))
        ));
    }

    #[test]
    fn fee_table_reads_only_configured_symbol() {
        let mut catalog = MarketCatalog::new();
        catalog.insert(
            ExchangeId::from("kucoin"),
            HashMap::from([(
                symbol(),
                MarketFees {
                    taker: Some(dec!(0.0008)),
                    maker: None,
                },
            )]),
        );
        catalog.insert(
            ExchangeId::from("bybit"),
            HashMap::from([(
                Symbol::new("BTC", "USDT"),
                MarketFees {
                    taker: Some(dec!(0.0005)),
                    maker: Some(dec!(0.0001)),
                },
            )]),
        );

        let fees = fee_table(&catalog, &symbol());

        assert_eq!(fees.len(), 1);
        assert_eq!(
            fees.schedule(&ExchangeId::from("kucoin")),
            FeeSchedule::new(dec!(0.0008), dec!(0.001))
        );
        assert_eq!(fees.taker(&ExchangeId::from("bybit")), dec!(0.001));
    }
}
