//! Scripted [`ExchangeGateway`] for orchestrator tests.
//!
//! Books, balances and fee schedules can be replaced between cycles through
//! a shared handle. Order submissions are recorded in call order. Any call
//! can be scripted to fail and orders can be slowed down.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{Currency, Depth, ExchangeId, OrderLeg, PriceLevel, Rate, Symbol};
use crate::error::{ExecutionError, MarketDataError, Result};
use crate::port::{
    BalanceEntry, BalanceSheet, BookSet, ExchangeGateway, MarketCatalog, MarketFees, OrderAck,
};

/// A gateway whose responses are set by the test.
///
/// `current_exchanges` lists every exchange given a book or registered with
/// [`with_exchange`](Self::with_exchange), in insertion order.
#[derive(Default)]
pub struct ScriptedExchange {
    exchanges: Mutex<Vec<ExchangeId>>,
    books: Mutex<BookSet>,
    balances: Mutex<BalanceSheet>,
    markets: Mutex<MarketCatalog>,
    book_failure: Mutex<Option<String>>,
    failing_orders: Mutex<HashSet<u32>>,
    order_delay: Mutex<Option<Duration>>,
    orders: Mutex<Vec<OrderLeg>>,
    order_calls: AtomicU32,
    balance_calls: AtomicU32,
    book_calls: AtomicU32,
}

impl ScriptedExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an exchange without giving it a book.
    #[must_use]
    pub fn with_exchange(self, exchange: &str) -> Self {
        self.register(ExchangeId::from(exchange));
        self
    }

    /// Top of book with one level per side.
    #[must_use]
    pub fn with_book(self, exchange: &str, bid: Decimal, ask: Decimal) -> Self {
        self.set_book(exchange, bid, ask);
        self
    }

    /// Full depth, including empty sides.
    #[must_use]
    pub fn with_depth(self, exchange: &str, depth: Depth) -> Self {
        let id = ExchangeId::from(exchange);
        self.register(id.clone());
        self.books.lock().insert(id, depth);
        self
    }

    /// Balance with `free == total` and nothing used.
    #[must_use]
    pub fn with_balance(self, exchange: &str, currency: &str, free: Decimal) -> Self {
        self.set_balance(exchange, currency, BalanceEntry::new(free, Decimal::ZERO, free));
        self
    }

    /// Fee schedule of `symbol` on `exchange`.
    #[must_use]
    pub fn with_fees(
        self,
        exchange: &str,
        symbol: &Symbol,
        taker: Option<Rate>,
        maker: Option<Rate>,
    ) -> Self {
        self.markets
            .lock()
            .entry(ExchangeId::from(exchange))
            .or_insert_with(HashMap::new)
            .insert(symbol.clone(), MarketFees { taker, maker });
        self
    }

    /// Make the `n`-th `create_order` call (1-based) fail.
    #[must_use]
    pub fn fail_order(self, n: u32) -> Self {
        self.failing_orders.lock().insert(n);
        self
    }

    /// Hold every `create_order` call for `delay` before answering.
    #[must_use]
    pub fn with_order_delay(self, delay: Duration) -> Self {
        *self.order_delay.lock() = Some(delay);
        self
    }

    /// Replace the book of one exchange.
    pub fn set_book(&self, exchange: &str, bid: Decimal, ask: Decimal) {
        let id = ExchangeId::from(exchange);
        self.register(id.clone());
        self.books.lock().insert(
            id,
            Depth::new(
                vec![PriceLevel::new(bid, Decimal::ONE_HUNDRED)],
                vec![PriceLevel::new(ask, Decimal::ONE_HUNDRED)],
            ),
        );
    }

    /// Replace one balance entry.
    pub fn set_balance(&self, exchange: &str, currency: &str, entry: BalanceEntry) {
        self.balances
            .lock()
            .entry(ExchangeId::from(exchange))
            .or_default()
            .insert(Currency::from(currency), entry);
    }

    /// Replace the whole balance sheet.
    pub fn set_balances(&self, sheet: BalanceSheet) {
        *self.balances.lock() = sheet;
    }

    /// Make `watch_order_books` fail until cleared with `None`.
    pub fn set_book_failure(&self, reason: Option<&str>) {
        *self.book_failure.lock() = reason.map(str::to_string);
    }

    /// Legs accepted so far, in submission order.
    pub fn orders(&self) -> Vec<OrderLeg> {
        self.orders.lock().clone()
    }

    /// Number of `create_order` calls, including failed ones.
    pub fn order_calls(&self) -> u32 {
        self.order_calls.load(Ordering::SeqCst)
    }

    pub fn balance_calls(&self) -> u32 {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn book_calls(&self) -> u32 {
        self.book_calls.load(Ordering::SeqCst)
    }

    fn register(&self, exchange: ExchangeId) {
        let mut exchanges = self.exchanges.lock();
        if !exchanges.contains(&exchange) {
            exchanges.push(exchange);
        }
    }
}

#[async_trait]
impl ExchangeGateway for ScriptedExchange {
    fn current_exchanges(&self) -> Vec<ExchangeId> {
        self.exchanges.lock().clone()
    }

    async fn get_balances(&self) -> Result<BalanceSheet> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balances.lock().clone())
    }

    async fn get_markets(&self) -> Result<MarketCatalog> {
        Ok(self.markets.lock().clone())
    }

    async fn watch_order_books(&self, _symbol: &Symbol) -> Result<BookSet> {
        self.book_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.book_failure.lock().clone() {
            return Err(MarketDataError::Unavailable(reason).into());
        }
        Ok(self.books.lock().clone())
    }

    async fn create_order(&self, leg: &OrderLeg) -> Result<OrderAck> {
        let delay = *self.order_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let call = self.order_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_orders.lock().contains(&call) {
            return Err(ExecutionError::OrderRejected(format!("scripted failure on call {call}")).into());
        }
        self.orders.lock().push(leg.clone());
        Ok(OrderAck::new(leg.exchange().clone(), format!("scripted-{call}")))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Balance sheet built from `(exchange, currency, entry)` triples.
pub fn sheet(entries: &[(&str, &str, BalanceEntry)]) -> BalanceSheet {
    let mut sheet: BalanceSheet = BTreeMap::new();
    for (exchange, currency, entry) in entries {
        sheet
            .entry(ExchangeId::from(*exchange))
            .or_default()
            .insert(Currency::from(*currency), *entry);
    }
    sheet
}
