//! Common utility functions for cost calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to a whole currency unit using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_to_whole;
///
/// assert_eq!(round_to_whole(dec!(10197.4)), dec!(10197));
/// assert_eq!(round_to_whole(dec!(10197.5)), dec!(10198));
/// assert_eq!(round_to_whole(dec!(10197.6)), dec!(10198));
/// ```
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-3), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_whole tests
    // =========================================================================

    #[test]
    fn round_to_whole_rounds_down_below_midpoint() {
        let result = round_to_whole(dec!(8497.49));

        assert_eq!(result, dec!(8497));
    }

    #[test]
    fn round_to_whole_rounds_up_at_midpoint() {
        let result = round_to_whole(dec!(8497.5));

        assert_eq!(result, dec!(8498));
    }

    #[test]
    fn round_to_whole_rounds_up_above_midpoint() {
        let result = round_to_whole(dec!(8497.51));

        assert_eq!(result, dec!(8498));
    }

    #[test]
    fn round_to_whole_preserves_whole_values() {
        let result = round_to_whole(dec!(10198));

        assert_eq!(result, dec!(10198));
    }

    #[test]
    fn round_to_whole_handles_zero() {
        let result = round_to_whole(dec!(0.0));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100), dec!(200)), dec!(200));
        assert_eq!(max(dec!(200), dec!(100)), dec!(200));
    }

    #[test]
    fn max_handles_negative_and_zero() {
        assert_eq!(max(dec!(-50), Decimal::ZERO), Decimal::ZERO);
    }
}
