//! Balance snapshot of a single currency on a single exchange.

use super::id::Currency;
use super::money::Volume;

/// Immutable balance snapshot for one currency on one exchange.
///
/// No relationship between `total` and `free + used` is enforced; the
/// values are whatever the exchange reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    currency: Currency,
    free: Volume,
    used: Volume,
    total: Volume,
}

impl Asset {
    /// Creates a new asset snapshot.
    #[must_use]
    pub const fn new(currency: Currency, free: Volume, used: Volume, total: Volume) -> Self {
        Self {
            currency,
            free,
            used,
            total,
        }
    }

    /// Returns the currency of this asset.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Amount available for new orders.
    #[must_use]
    pub const fn free(&self) -> Volume {
        self.free
    }

    /// Amount reserved by open orders.
    #[must_use]
    pub const fn used(&self) -> Volume {
        self.used
    }

    /// Total amount held.
    #[must_use]
    pub const fn total(&self) -> Volume {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn asset_keeps_reported_values_verbatim() {
        // total deliberately disagrees with free + used
        let asset = Asset::new(Currency::from("USDT"), dec!(10), dec!(2), dec!(15));

        assert_eq!(asset.currency().as_str(), "USDT");
        assert_eq!(asset.free(), dec!(10));
        assert_eq!(asset.used(), dec!(2));
        assert_eq!(asset.total(), dec!(15));
    }
}
