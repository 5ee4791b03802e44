//! Last-known balances per exchange per currency.
//!
//! The ledger answers sufficiency queries from its current snapshot only.
//! Nothing here refreshes implicitly; callers refresh before a query when
//! freshness matters.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{Asset, Currency, DomainError, ExchangeId, Volume};
use crate::error::Result;
use crate::port::{BalanceSheet, ExchangeGateway};

/// Balances keyed by exchange, then currency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceLedger {
    balances: BTreeMap<ExchangeId, BTreeMap<Currency, Asset>>,
}

impl BalanceLedger {
    /// Creates an empty ledger. This is the simulation-mode starting point;
    /// no balances are fabricated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger from an exchange balance response.
    #[must_use]
    pub fn from_sheet(sheet: BalanceSheet) -> Self {
        let mut ledger = Self::new();
        ledger.merge(sheet);
        ledger
    }

    /// Creates a ledger from a live balance fetch.
    pub async fn load(gateway: &dyn ExchangeGateway) -> Result<Self> {
        Ok(Self::from_sheet(gateway.get_balances().await?))
    }

    /// Free balance of `currency` on `exchange`.
    pub fn get_free(&self, exchange: &ExchangeId, currency: &Currency) -> Result<Volume> {
        Ok(self.asset(exchange, currency)?.free())
    }

    /// Total balance of `currency` on `exchange`.
    pub fn get_total(&self, exchange: &ExchangeId, currency: &Currency) -> Result<Volume> {
        Ok(self.asset(exchange, currency)?.total())
    }

    /// Sum of `total` for `currency` over every exchange in the ledger.
    ///
    /// Exchanges holding no entry for the currency contribute zero.
    #[must_use]
    pub fn get_total_currency(&self, currency: &Currency) -> Volume {
        self.balances
            .values()
            .filter_map(|assets| assets.get(currency))
            .map(Asset::total)
            .sum()
    }

    /// Whether the stored free balance covers `required_amount`.
    ///
    /// Fails with `BalanceNotFound` when the ledger has no such entry.
    pub fn check_free_amount(
        &self,
        exchange: &ExchangeId,
        currency: &Currency,
        required_amount: Decimal,
    ) -> Result<bool> {
        Ok(self.get_free(exchange, currency)? >= required_amount)
    }

    /// Look up the full asset snapshot.
    pub fn asset(&self, exchange: &ExchangeId, currency: &Currency) -> Result<&Asset> {
        self.try_asset(exchange, currency).ok_or_else(|| {
            DomainError::BalanceNotFound {
                exchange: exchange.clone(),
                currency: currency.clone(),
            }
            .into()
        })
    }

    /// Look up an asset, returning `None` when the exchange or currency is absent.
    #[must_use]
    pub fn try_asset(&self, exchange: &ExchangeId, currency: &Currency) -> Option<&Asset> {
        self.balances.get(exchange)?.get(currency)
    }

    /// Fetch balances and merge them into the ledger.
    ///
    /// Only currencies present in the new response are replaced. Currencies
    /// missing from it keep their previous value, so the ledger can mix
    /// snapshots taken at different times.
    pub async fn refresh(&mut self, gateway: &dyn ExchangeGateway) -> Result<()> {
        let sheet = gateway.get_balances().await?;
        self.merge(sheet);
        Ok(())
    }

    /// Merge a balance response using the per-currency replacement rule.
    pub fn merge(&mut self, sheet: BalanceSheet) {
        for (exchange, entries) in sheet {
            debug!(exchange = %exchange, currencies = entries.len(), "Merging balances");
            let assets = self.balances.entry(exchange).or_default();
            for (currency, entry) in entries {
                let asset = Asset::new(currency.clone(), entry.free, entry.used, entry.total);
                assets.insert(currency, asset);
            }
        }
    }

    /// Exchanges present in the ledger.
    pub fn exchanges(&self) -> impl Iterator<Item = &ExchangeId> {
        self.balances.keys()
    }

    /// Check if the ledger holds no exchange.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::port::BalanceEntry;
    use rust_decimal_macros::dec;

    fn sheet(entries: &[(&str, &str, Decimal, Decimal)]) -> BalanceSheet {
        let mut sheet = BalanceSheet::new();
        for (exchange, currency, free, total) in entries {
            sheet
                .entry(ExchangeId::from(*exchange))
                .or_default()
                .insert(
                    Currency::from(*currency),
                    BalanceEntry::new(*free, *total - *free, *total),
                );
        }
        sheet
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = BalanceLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.get_total_currency(&Currency::from("USDT")), Decimal::ZERO);
    }

    #[test]
    fn lookups_return_stored_values() {
        let ledger = BalanceLedger::from_sheet(sheet(&[("kucoin", "USDT", dec!(10), dec!(12))]));
        let kucoin = ExchangeId::from("kucoin");
        let usdt = Currency::from("USDT");

        assert_eq!(ledger.get_free(&kucoin, &usdt).unwrap(), dec!(10));
        assert_eq!(ledger.get_total(&kucoin, &usdt).unwrap(), dec!(12));
        assert_eq!(ledger.asset(&kucoin, &usdt).unwrap().used(), dec!(2));
    }

    #[test]
    fn missing_exchange_or_currency_is_not_found() {
        let ledger = BalanceLedger::from_sheet(sheet(&[("kucoin", "USDT", dec!(10), dec!(10))]));

        let err = ledger
            .get_free(&ExchangeId::from("bybit"), &Currency::from("USDT"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::BalanceNotFound { .. })
        ));

        let err = ledger
            .get_total(&ExchangeId::from("kucoin"), &Currency::from("EVER"))
            .unwrap_err();
        assert_eq!(err.to_string(), "no balance recorded for EVER on kucoin");
    }

    #[test]
    fn total_currency_sums_across_exchanges() {
        let ledger = BalanceLedger::from_sheet(sheet(&[
            ("kucoin", "USDT", dec!(5), dec!(10)),
            ("bybit", "USDT", dec!(1), dec!(2.5)),
            ("bybit", "EVER", dec!(100), dec!(100)),
            ("gateio", "EVER", dec!(3), dec!(3)),
        ]));

        assert_eq!(ledger.get_total_currency(&Currency::from("USDT")), dec!(12.5));
        assert_eq!(ledger.get_total_currency(&Currency::from("EVER")), dec!(103));
        assert_eq!(ledger.get_total_currency(&Currency::from("BTC")), dec!(0));
    }

    #[test]
    fn check_free_amount_compares_inclusive() {
        let ledger = BalanceLedger::from_sheet(sheet(&[("kucoin", "USDT", dec!(10), dec!(10))]));
        let kucoin = ExchangeId::from("kucoin");
        let usdt = Currency::from("USDT");

        assert!(ledger.check_free_amount(&kucoin, &usdt, dec!(10)).unwrap());
        assert!(ledger.check_free_amount(&kucoin, &usdt, dec!(9.99)).unwrap());
        assert!(!ledger.check_free_amount(&kucoin, &usdt, dec!(10.01)).unwrap());
    }

    #[test]
    fn merge_replaces_present_currencies_and_keeps_absent_ones() {
        let mut ledger = BalanceLedger::from_sheet(sheet(&[
            ("kucoin", "USDT", dec!(10), dec!(10)),
            ("kucoin", "EVER", dec!(50), dec!(50)),
            ("bybit", "USDT", dec!(7), dec!(7)),
        ]));
        let before = ledger.clone();

        ledger.merge(sheet(&[("kucoin", "USDT", dec!(4), dec!(6))]));

        let kucoin = ExchangeId::from("kucoin");
        let bybit = ExchangeId::from("bybit");
        let usdt = Currency::from("USDT");
        let ever = Currency::from("EVER");

        assert_eq!(ledger.get_free(&kucoin, &usdt).unwrap(), dec!(4));
        assert_eq!(ledger.get_total(&kucoin, &usdt).unwrap(), dec!(6));
        assert_eq!(ledger.asset(&kucoin, &ever), before.asset(&kucoin, &ever));
        assert_eq!(ledger.asset(&bybit, &usdt), before.asset(&bybit, &usdt));
    }

    #[test]
    fn merge_adds_unknown_exchange() {
        let mut ledger = BalanceLedger::new();
        ledger.merge(sheet(&[("okx", "USDT", dec!(1), dec!(1))]));

        let exchanges: Vec<_> = ledger.exchanges().map(ExchangeId::as_str).collect();
        assert_eq!(exchanges, vec!["okx"]);
    }
}
