//! Monetary types for price, volume and rate representation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Fractional rate (fees), e.g. `0.001` for 0.1%.
pub type Rate = Decimal;

/// Round for display, half away from zero.
#[must_use]
pub fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_and_volume_are_decimal() {
        let price: Price = dec!(0.06682);
        let volume: Volume = dec!(20);

        assert_eq!(price * volume, dec!(1.33640));
    }

    #[test]
    fn round_display_rounds_half_away_from_zero() {
        assert_eq!(round_display(dec!(0.0023222), 5), dec!(0.00232));
        assert_eq!(round_display(dec!(0.000025), 5), dec!(0.00003));
        assert_eq!(round_display(dec!(-0.000025), 5), dec!(-0.00003));
    }
}
