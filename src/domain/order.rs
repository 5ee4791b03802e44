//! Order legs and two-leg arbitrage plans.
//!
//! An [`OrderPlan`] always holds exactly one buy leg and one sell leg,
//! together with the [`ProfitReport`] computed at detection time.

use std::fmt;

use rust_decimal::Decimal;

use super::id::{ExchangeId, Symbol};
use super::money::{round_display, Price, Volume};

/// Decimal places used when displaying profit.
pub const PROFIT_DISPLAY_DP: u32 = 5;

/// Decimal places used when displaying the profit percentage.
pub const PROFIT_PCT_DISPLAY_DP: u32 = 6;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl OrderSide {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type. Arbitrage legs are always limit orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderType {
    #[default]
    Limit,
}

impl OrderType {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "limit",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of an arbitrage trade on one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLeg {
    exchange: ExchangeId,
    symbol: Symbol,
    order_type: OrderType,
    side: OrderSide,
    amount: Volume,
    price: Price,
}

impl OrderLeg {
    /// Creates a limit order leg.
    #[must_use]
    pub fn limit(
        exchange: ExchangeId,
        symbol: Symbol,
        side: OrderSide,
        amount: Volume,
        price: Price,
    ) -> Self {
        Self {
            exchange,
            symbol,
            order_type: OrderType::Limit,
            side,
            amount,
            price,
        }
    }

    /// Exchange the leg is placed on.
    #[must_use]
    pub const fn exchange(&self) -> &ExchangeId {
        &self.exchange
    }

    /// Traded symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Order type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Buy or sell.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Amount of the counter currency.
    #[must_use]
    pub const fn amount(&self) -> Volume {
        self.amount
    }

    /// Limit price in the base currency.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Cost of the leg in the base currency (`amount * price`).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.amount * self.price
    }
}

impl fmt::Display for OrderLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} @ {} on {}",
            self.order_type, self.side, self.amount, self.symbol, self.price, self.exchange
        )
    }
}

/// Net-of-fees profit of a plan.
///
/// `profit_pct` is `profit / 100`, which is not a percentage of notional.
/// It is kept as reported for compatibility with existing dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitReport {
    profit: Decimal,
    profit_pct: Decimal,
    fees: Decimal,
}

impl ProfitReport {
    /// Builds a report, deriving `profit_pct` from `profit`.
    #[must_use]
    pub fn new(profit: Decimal, fees: Decimal) -> Self {
        Self {
            profit,
            profit_pct: profit / Decimal::ONE_HUNDRED,
            fees,
        }
    }

    /// Net profit in the base currency.
    #[must_use]
    pub const fn profit(&self) -> Decimal {
        self.profit
    }

    /// `profit / 100`.
    #[must_use]
    pub const fn profit_pct(&self) -> Decimal {
        self.profit_pct
    }

    /// Sum of both legs' taker fees.
    #[must_use]
    pub const fn fees(&self) -> Decimal {
        self.fees
    }

    /// Profit rounded to 5 decimal places.
    #[must_use]
    pub fn display_profit(&self) -> Decimal {
        round_display(self.profit, PROFIT_DISPLAY_DP)
    }

    /// Profit percentage rounded to 6 decimal places.
    #[must_use]
    pub fn display_profit_pct(&self) -> Decimal {
        round_display(self.profit_pct, PROFIT_PCT_DISPLAY_DP)
    }
}

impl fmt::Display for ProfitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "profit {:.5} ({:.6}) fees {}",
            self.display_profit(),
            self.display_profit_pct(),
            self.fees
        )
    }
}

/// A detected opportunity: buy on one venue, sell on another.
///
/// Both legs may target the same exchange when one venue holds both the
/// lowest ask and the highest bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    buy: OrderLeg,
    sell: OrderLeg,
    report: ProfitReport,
}

impl OrderPlan {
    /// Creates a plan from its buy and sell legs.
    ///
    /// # Panics
    ///
    /// Debug builds assert that the legs carry the expected sides.
    #[must_use]
    pub fn new(buy: OrderLeg, sell: OrderLeg, report: ProfitReport) -> Self {
        debug_assert_eq!(buy.side(), OrderSide::Buy);
        debug_assert_eq!(sell.side(), OrderSide::Sell);
        Self { buy, sell, report }
    }

    /// The buy leg (lowest ask).
    #[must_use]
    pub const fn buy(&self) -> &OrderLeg {
        &self.buy
    }

    /// The sell leg (highest bid).
    #[must_use]
    pub const fn sell(&self) -> &OrderLeg {
        &self.sell
    }

    /// Both legs, buy first. This is also submission order.
    #[must_use]
    pub const fn legs(&self) -> [&OrderLeg; 2] {
        [&self.buy, &self.sell]
    }

    /// Profit computed at detection time.
    #[must_use]
    pub const fn report(&self) -> &ProfitReport {
        &self.report
    }

    /// Sum of both legs' amounts.
    #[must_use]
    pub fn turnover(&self) -> Volume {
        self.buy.amount() + self.sell.amount()
    }

    /// Check if both legs target the same exchange.
    #[must_use]
    pub fn is_single_venue(&self) -> bool {
        self.buy.exchange() == self.sell.exchange()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn symbol() -> Symbol {
        Symbol::new("EVER", "USDT")
    }

    fn plan(buy_on: &str, sell_on: &str) -> OrderPlan {
        OrderPlan::new(
            OrderLeg::limit(
                ExchangeId::from(buy_on),
                symbol(),
                OrderSide::Buy,
                dec!(20),
                dec!(0.06682),
            ),
            OrderLeg::limit(
                ExchangeId::from(sell_on),
                symbol(),
                OrderSide::Sell,
                dec!(20),
                dec!(0.06707),
            ),
            ProfitReport::new(dec!(0.0023222), dec!(0.0026778)),
        )
    }

    #[test]
    fn leg_display_describes_order() {
        let plan = plan("kucoin", "bybit");
        assert_eq!(
            plan.buy().to_string(),
            "limit buy 20 EVER/USDT @ 0.06682 on kucoin"
        );
        assert_eq!(plan.buy().notional(), dec!(1.33640));
    }

    #[test]
    fn profit_pct_is_profit_over_one_hundred() {
        let report = ProfitReport::new(dec!(0.0023222), dec!(0.0026778));
        assert_eq!(report.profit_pct(), dec!(0.000023222));
        assert_eq!(report.display_profit().to_string(), "0.00232");
        assert_eq!(report.display_profit_pct().to_string(), "0.000023");
    }

    #[test]
    fn report_display_pads_to_fixed_precision() {
        let report = ProfitReport::new(dec!(0.01), dec!(0.002));
        assert_eq!(report.to_string(), "profit 0.01000 (0.000100) fees 0.002");
    }

    #[test]
    fn plan_turnover_sums_both_legs() {
        let plan = plan("kucoin", "bybit");
        assert_eq!(plan.turnover(), dec!(40));
        assert!(!plan.is_single_venue());
        assert_eq!(plan.legs()[0].side(), OrderSide::Buy);
        assert_eq!(plan.legs()[1].side(), OrderSide::Sell);
    }

    #[test]
    fn plan_may_target_a_single_venue() {
        assert!(plan("kucoin", "kucoin").is_single_venue());
    }
}
