//! Lag autocorrelation and season length inference
//!
//! The season length of a series is taken to be the lag at which the series
//! correlates best with a shifted copy of itself.

/// Season length used when the series is too short to look for one.
pub const DEFAULT_SEASON_LENGTH: usize = 2;

/// A later lag must beat the best correlation by more than this to replace it,
/// so exact multiples of the true period do not win on rounding noise.
const CORRELATION_TOLERANCE: f64 = 1e-9;

/// Arithmetic mean of the values, `0.0` for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Autocorrelation of `values` at `lag` around the given mean.
///
/// Both the covariance and the variance are summed over the overlapping
/// prefix `0..len - lag`. Returns `NaN` when that variance is zero or when the
/// lag leaves no overlap.
pub fn autocorrelation(values: &[f64], lag: usize, mean: f64) -> f64 {
    let overlap = values.len().saturating_sub(lag);

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for i in 0..overlap {
        let deviation = values[i] - mean;
        covariance += deviation * (values[i + lag] - mean);
        variance += deviation * deviation;
    }

    if variance == 0.0 {
        f64::NAN
    } else {
        covariance / variance
    }
}

/// Infer the season length of a series.
///
/// Every lag in `1..=len / 2` is scored with [`autocorrelation`]; the lag with
/// the highest finite score wins, ties going to the shorter lag. Undefined
/// correlations never win. When no lag scores above `-1` the result is `1`.
/// Series with fewer than two values get [`DEFAULT_SEASON_LENGTH`].
pub fn infer_season_length(values: &[f64]) -> usize {
    if values.len() < 2 {
        return DEFAULT_SEASON_LENGTH;
    }

    let mean = mean(values);
    let mut best_correlation = -1.0;
    let mut best_lag = 1;

    for lag in 1..=values.len() / 2 {
        let correlation = autocorrelation(values, lag, mean);
        if correlation.is_nan() {
            continue;
        }
        if correlation > best_correlation + CORRELATION_TOLERANCE {
            best_correlation = correlation;
            best_lag = lag;
        }
    }

    best_lag
}
