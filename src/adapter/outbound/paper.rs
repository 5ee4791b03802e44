//! Simulated exchanges for dry mode.
//!
//! Each venue publishes a static top of book and fills every order
//! immediately at the leg's limit price. Fills move the venue's balances
//! and charge the venue's taker rate in the base currency, so a dry run
//! shows how the ledger evolves without touching a real account.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{
    Currency, Depth, ExchangeId, OrderLeg, OrderSide, PriceLevel, Quote, Symbol, DEFAULT_FEE_RATE,
};
use crate::error::{ExecutionError, MarketDataError, Result};
use crate::infrastructure::config::PaperConfig;
use crate::port::{
    BalanceEntry, BalanceSheet, BookSet, ExchangeGateway, MarketCatalog, MarketFees, OrderAck,
};

/// Static market data for one simulated venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperVenue {
    pub quote: Quote,
    pub fees: MarketFees,
}

/// A filled paper order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperFill {
    pub order_id: String,
    pub leg: OrderLeg,
    /// Fee charged in the base currency.
    pub fee: Decimal,
}

/// In-memory exchange set that fills every accepted order in full.
#[derive(Debug)]
pub struct PaperExchange {
    symbol: Symbol,
    venues: BTreeMap<ExchangeId, PaperVenue>,
    balances: RwLock<BTreeMap<ExchangeId, BTreeMap<Currency, Decimal>>>,
    fills: RwLock<Vec<PaperFill>>,
    next_order: AtomicU64,
}

impl PaperExchange {
    /// Create a paper exchange for `symbol` with no venues.
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            venues: BTreeMap::new(),
            balances: RwLock::new(BTreeMap::new()),
            fills: RwLock::new(Vec::new()),
            next_order: AtomicU64::new(1),
        }
    }

    /// Build every venue listed in the `[paper]` configuration.
    #[must_use]
    pub fn from_config(symbol: Symbol, config: &PaperConfig) -> Self {
        let mut exchange = Self::new(symbol);
        for (id, venue) in &config.exchanges {
            exchange = exchange.with_venue(
                id.clone(),
                Quote::new(venue.bid, venue.ask),
                MarketFees {
                    taker: venue.taker,
                    maker: venue.maker,
                },
            );
            for (currency, amount) in &venue.balances {
                exchange = exchange.with_balance(id.clone(), currency.clone(), *amount);
            }
        }
        exchange
    }

    /// Add or replace a venue.
    #[must_use]
    pub fn with_venue(mut self, exchange: ExchangeId, quote: Quote, fees: MarketFees) -> Self {
        self.venues.insert(exchange, PaperVenue { quote, fees });
        self
    }

    /// Set the starting free balance of one currency on one venue.
    #[must_use]
    pub fn with_balance(self, exchange: ExchangeId, currency: Currency, amount: Decimal) -> Self {
        self.balances
            .write()
            .entry(exchange)
            .or_default()
            .insert(currency, amount);
        self
    }

    /// Current balance of `currency` on `exchange`, zero when unknown.
    #[must_use]
    pub fn balance(&self, exchange: &ExchangeId, currency: &Currency) -> Decimal {
        self.balances
            .read()
            .get(exchange)
            .and_then(|currencies| currencies.get(currency))
            .copied()
            .unwrap_or_default()
    }

    /// Every fill so far, in submission order.
    #[must_use]
    pub fn fills(&self) -> Vec<PaperFill> {
        self.fills.read().clone()
    }

    fn venue(&self, exchange: &ExchangeId) -> Result<&PaperVenue> {
        self.venues.get(exchange).ok_or_else(|| {
            ExecutionError::OrderRejected(format!("unknown paper exchange {exchange}")).into()
        })
    }

    /// Apply a fill to `wallet`, rejecting it when the spent currency runs short.
    fn settle(
        wallet: &mut BTreeMap<Currency, Decimal>,
        leg: &OrderLeg,
        fee: Decimal,
    ) -> Result<()> {
        let counter = leg.symbol().counter();
        let base = leg.symbol().base();
        let notional = leg.notional();

        let (spent, cost) = match leg.side() {
            OrderSide::Buy => (base, notional + fee),
            OrderSide::Sell => (counter, leg.amount()),
        };
        let available = wallet.get(spent).copied().unwrap_or_default();
        if available < cost {
            return Err(ExecutionError::OrderRejected(format!(
                "insufficient {spent} on {}: need {cost}, have {available}",
                leg.exchange()
            ))
            .into());
        }

        match leg.side() {
            OrderSide::Buy => {
                *wallet.entry(base.clone()).or_default() -= cost;
                *wallet.entry(counter.clone()).or_default() += leg.amount();
            }
            OrderSide::Sell => {
                *wallet.entry(counter.clone()).or_default() -= cost;
                *wallet.entry(base.clone()).or_default() += notional - fee;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ExchangeGateway for PaperExchange {
    fn current_exchanges(&self) -> Vec<ExchangeId> {
        self.venues.keys().cloned().collect()
    }

    async fn get_balances(&self) -> Result<BalanceSheet> {
        let balances = self.balances.read();
        Ok(balances
            .iter()
            .map(|(exchange, currencies)| {
                let entries = currencies
                    .iter()
                    .map(|(currency, amount)| {
                        (
                            currency.clone(),
                            BalanceEntry::new(*amount, Decimal::ZERO, *amount),
                        )
                    })
                    .collect();
                (exchange.clone(), entries)
            })
            .collect())
    }

    async fn get_markets(&self) -> Result<MarketCatalog> {
        Ok(self
            .venues
            .iter()
            .map(|(exchange, venue)| {
                (
                    exchange.clone(),
                    HashMap::from([(self.symbol.clone(), venue.fees)]),
                )
            })
            .collect())
    }

    async fn watch_order_books(&self, symbol: &Symbol) -> Result<BookSet> {
        if *symbol != self.symbol {
            return Err(MarketDataError::Unavailable(format!(
                "paper venues only quote {}, not {symbol}",
                self.symbol
            ))
            .into());
        }

        Ok(self
            .venues
            .iter()
            .map(|(exchange, venue)| {
                let depth = Depth::new(
                    vec![PriceLevel::new(venue.quote.bid(), Decimal::MAX)],
                    vec![PriceLevel::new(venue.quote.ask(), Decimal::MAX)],
                );
                (exchange.clone(), depth)
            })
            .collect())
    }

    async fn create_order(&self, leg: &OrderLeg) -> Result<OrderAck> {
        let venue = self.venue(leg.exchange())?;
        let rate = venue.fees.taker.unwrap_or(DEFAULT_FEE_RATE);
        let fee = leg.notional() * rate;

        {
            let mut balances = self.balances.write();
            let wallet = balances.entry(leg.exchange().clone()).or_default();
            Self::settle(wallet, leg, fee)?;
        }

        let order_id = format!(
            "paper-{}",
            self.next_order.fetch_add(1, Ordering::Relaxed)
        );
        debug!(order_id = %order_id, fee = %fee, "Paper fill");
        info!(leg = %leg, order_id = %order_id, "Paper order filled");

        self.fills.write().push(PaperFill {
            order_id: order_id.clone(),
            leg: leg.clone(),
            fee,
        });

        Ok(OrderAck::new(leg.exchange().clone(), order_id))
    }

    fn name(&self) -> &'static str {
        "paper"
    }
}
