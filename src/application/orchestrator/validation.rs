//! Balance gate applied before any leg is submitted.

use rust_decimal::Decimal;

use crate::application::ledger::BalanceLedger;
use crate::domain::{Currency, ExchangeId, OrderLeg, OrderPlan, OrderSide};

/// A leg whose venue does not hold enough free balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceShortfall {
    /// Exchange of the leg.
    pub exchange: ExchangeId,
    /// Currency the leg spends.
    pub currency: Currency,
    /// Amount the leg needs.
    pub required: Decimal,
    /// Free amount in the ledger.
    pub available: Decimal,
}

/// Currency a leg spends and how much of it.
///
/// Selling spends the counter currency (`amount`); buying spends the base
/// currency (`amount * price`).
#[must_use]
pub fn requirement(leg: &OrderLeg) -> (&Currency, Decimal) {
    match leg.side() {
        OrderSide::Sell => (leg.symbol().counter(), leg.amount()),
        OrderSide::Buy => (leg.symbol().base(), leg.notional()),
    }
}

/// Check both legs against the ledger's current snapshot.
///
/// A currency with no ledger entry on the leg's exchange is not checked and
/// counts as sufficient. Returns every failing leg; empty means the plan
/// may execute.
#[must_use]
pub fn validate_balance(ledger: &BalanceLedger, plan: &OrderPlan) -> Vec<BalanceShortfall> {
    plan.legs()
        .into_iter()
        .filter_map(|leg| {
            let (currency, required) = requirement(leg);
            let asset = ledger.try_asset(leg.exchange(), currency)?;
            (asset.free() < required).then(|| BalanceShortfall {
                exchange: leg.exchange().clone(),
                currency: currency.clone(),
                required,
                available: asset.free(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProfitReport, Symbol};
    use crate::port::{BalanceEntry, BalanceSheet};
    use rust_decimal_macros::dec;

    fn plan(buy_on: &str, sell_on: &str) -> OrderPlan {
        let symbol = Symbol::new("EVER", "USDT");
        OrderPlan::new(
            OrderLeg::limit(
                ExchangeId::from(buy_on),
                symbol.clone(),
                OrderSide::Buy,
                dec!(20),
                dec!(0.5),
            ),
            OrderLeg::limit(
                ExchangeId::from(sell_on),
                symbol,
                OrderSide::Sell,
                dec!(20),
                dec!(0.6),
            ),
            ProfitReport::new(dec!(1), dec!(0)),
        )
    }

    fn ledger(entries: &[(&str, &str, Decimal)]) -> BalanceLedger {
        let mut sheet = BalanceSheet::new();
        for (exchange, currency, free) in entries {
            sheet
                .entry(ExchangeId::from(*exchange))
                .or_default()
                .insert(Currency::from(*currency), BalanceEntry::new(*free, dec!(0), *free));
        }
        BalanceLedger::from_sheet(sheet)
    }

    #[test]
    fn buy_leg_needs_notional_in_base_currency() {
        let plan = plan("kucoin", "bybit");
        let (currency, required) = requirement(plan.buy());
        assert_eq!(currency.as_str(), "USDT");
        assert_eq!(required, dec!(10));

        let (currency, required) = requirement(plan.sell());
        assert_eq!(currency.as_str(), "EVER");
        assert_eq!(required, dec!(20));
    }

    #[test]
    fn sufficient_balances_pass() {
        let ledger = ledger(&[("kucoin", "USDT", dec!(10)), ("bybit", "EVER", dec!(20))]);
        assert!(validate_balance(&ledger, &plan("kucoin", "bybit")).is_empty());
    }

    #[test]
    fn reports_every_short_leg() {
        let ledger = ledger(&[("kucoin", "USDT", dec!(9.99)), ("bybit", "EVER", dec!(5))]);

        let shortfalls = validate_balance(&ledger, &plan("kucoin", "bybit"));

        assert_eq!(
            shortfalls,
            vec![
                BalanceShortfall {
                    exchange: ExchangeId::from("kucoin"),
                    currency: Currency::from("USDT"),
                    required: dec!(10),
                    available: dec!(9.99),
                },
                BalanceShortfall {
                    exchange: ExchangeId::from("bybit"),
                    currency: Currency::from("EVER"),
                    required: dec!(20),
                    available: dec!(5),
                },
            ]
        );
    }

    #[test]
    fn missing_currency_or_exchange_counts_as_sufficient() {
        // kucoin has no USDT entry, bybit is absent entirely
        let ledger = ledger(&[("kucoin", "EVER", dec!(0))]);
        assert!(validate_balance(&ledger, &plan("kucoin", "bybit")).is_empty());
        assert!(validate_balance(&BalanceLedger::new(), &plan("kucoin", "bybit")).is_empty());
    }

    #[test]
    fn single_venue_plan_checks_both_currencies_on_that_venue() {
        let ledger = ledger(&[("kucoin", "USDT", dec!(100)), ("kucoin", "EVER", dec!(1))]);

        let shortfalls = validate_balance(&ledger, &plan("kucoin", "kucoin"));

        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls[0].currency.as_str(), "EVER");
    }
}
