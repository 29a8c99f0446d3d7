//! Rounding and forecast value extraction

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `places` decimals, halves away from zero.
///
/// The exact binary value is rounded, so `4.35` (stored as
/// `4.3499999999999996...`) becomes `4.3`. Values too large for a decimal
/// and non-finite values are returned unchanged.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}

/// Pick the first usable value from a forecast array.
///
/// Starting at `index`, entries that are zero or not finite are skipped.
/// The first finite non-zero entry is returned as an absolute value rounded
/// to one decimal place. When the array holds no such entry from `index`
/// onwards the result is `0.0`, which callers read as "no usable forecast".
pub fn extract_forecast_value(forecast: &[f64], index: usize) -> f64 {
    forecast
        .iter()
        .skip(index)
        .find(|value| value.is_finite() && **value != 0.0)
        .map(|value| round_half_up(value.abs(), 1))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4.25, 4.3)]
    #[case(4.24, 4.2)]
    #[case(4.35, 4.3)]
    #[case(0.15, 0.1)]
    #[case(1.45, 1.4)]
    #[case(0.75, 0.8)]
    #[case(-0.874, -0.9)]
    #[case(7.0, 7.0)]
    fn test_round_half_up(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(round_half_up(input, 1), expected);
    }

    #[test]
    fn test_round_half_up_passes_through_non_finite() {
        assert!(round_half_up(f64::NAN, 1).is_nan());
        assert_eq!(round_half_up(f64::INFINITY, 1), f64::INFINITY);
        assert_eq!(round_half_up(1.0e30, 1), 1.0e30);
    }

    #[test]
    fn test_extract_rounds_the_stored_value() {
        assert_eq!(extract_forecast_value(&[-4.35], 0), 4.3);
    }

    #[test]
    fn test_extract_skips_unusable_entries() {
        let forecast = [0.0, f64::NAN, f64::INFINITY, -4.26, 5.0];
        assert_eq!(extract_forecast_value(&forecast, 0), 4.3);
    }

    #[test]
    fn test_extract_starts_at_index() {
        let forecast = [4.0, 4.6, 5.14];
        assert_eq!(extract_forecast_value(&forecast, 0), 4.0);
        assert_eq!(extract_forecast_value(&forecast, 2), 5.1);
    }

    #[test]
    fn test_extract_returns_zero_when_nothing_usable() {
        assert_eq!(extract_forecast_value(&[0.0, 0.0, 0.0], 0), 0.0);
        assert_eq!(extract_forecast_value(&[f64::NAN, f64::NEG_INFINITY], 0), 0.0);
        assert_eq!(extract_forecast_value(&[3.2], 1), 0.0);
        assert_eq!(extract_forecast_value(&[], 0), 0.0);
    }

    #[test]
    fn test_extracted_value_has_one_decimal() {
        let value = extract_forecast_value(&[-3.14159], 0);
        assert!(value >= 0.0);
        assert_eq!(value, 3.1);
    }
}
