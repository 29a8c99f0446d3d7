//! Holt-Winters seasonal smoothing
//!
//! Level and trend are smoothed exponentially while one seasonal index per
//! position in the season scales them:
//!
//! ```text
//! Level:    A_t     = α y_t / S_t + (1 - α)(A_{t-1} + B_{t-1})
//! Trend:    B_t     = β (A_t - A_{t-1}) + (1 - β) B_{t-1}
//! Season:   S_{t+L} = γ y_t / A_t + (1 - γ) S_t
//! Forecast: F_{T+h} = (A_T + h B_T) S_{T+1+((h-1) mod L)}
//! ```
//!
//! Two full seasons of observations are needed to initialise the model.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Smoothing coefficients for level, trend and season
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParams {
    /// Level smoothing
    pub alpha: f64,
    /// Trend smoothing
    pub beta: f64,
    /// Seasonal smoothing
    pub gamma: f64,
}

impl SmoothingParams {
    /// Create a new set of smoothing coefficients
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Result of a seasonal smoothing pass over a window of observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalDecomposition {
    season_length: usize,
    offset: usize,
    observations: Vec<f64>,
    initial_level: f64,
    initial_trend: f64,
    level: f64,
    trend: f64,
    seasonal: Vec<f64>,
    fitted: Vec<f64>,
}

impl SeasonalDecomposition {
    /// Run the smoothing pass over the most recent observations of `values`.
    ///
    /// The analysis window is `max(window, 2 * season_length)` values long,
    /// shortened to the available data and then trimmed at its start to a
    /// whole number of seasons.
    pub fn fit(
        values: &[f64],
        season_length: usize,
        window: usize,
        params: SmoothingParams,
    ) -> Result<Self> {
        if season_length == 0 {
            return Err(MathError::InvalidInput(
                "Season length must be at least 1".to_string(),
            ));
        }

        let required = season_length * 2;
        if values.len() < required {
            return Err(MathError::InsufficientData(format!(
                "Too few data: two seasons of length {} need {} values, got {}",
                season_length,
                required,
                values.len()
            )));
        }

        let window = window.max(required);
        let count = values.len();
        let mut ylen = window.min(count);
        let trim = ylen % season_length;
        ylen -= trim;
        let offset = count.saturating_sub(window) + trim;
        let y = &values[offset..offset + ylen];

        let l = season_length as f64;
        let ybar1 = y[..season_length].iter().sum::<f64>() / l;
        let ybar2 = y[season_length..required].iter().sum::<f64>() / l;
        let b0 = (ybar2 - ybar1) / l;
        // mean of positions 2..=L+1, the time index of the first season
        let tbar = (l + 2.0) / 2.0;
        let a0 = ybar1 - b0 * tbar;

        let raw_indices: Vec<f64> = y
            .iter()
            .enumerate()
            .map(|(i, value)| value / (a0 + (i + 1) as f64 * b0))
            .collect();

        let mut seasonal = vec![0.0; ylen + season_length];
        for i in 0..season_length {
            seasonal[i] = (raw_indices[i] + raw_indices[i + season_length]) / 2.0;
        }
        let scale = l / seasonal[..season_length].iter().sum::<f64>();
        for index in seasonal.iter_mut().take(season_length) {
            *index *= scale;
        }

        let SmoothingParams { alpha, beta, gamma } = params;
        let mut fitted = Vec::with_capacity(ylen);
        let mut level = a0;
        let mut trend = b0;
        for (i, &value) in y.iter().enumerate() {
            let prev_level = level;
            let prev_trend = trend;

            level = alpha * value / seasonal[i] + (1.0 - alpha) * (prev_level + prev_trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * prev_trend;
            seasonal[i + season_length] = gamma * value / level + (1.0 - gamma) * seasonal[i];

            fitted.push((a0 + b0 * (i + 1) as f64) * seasonal[i]);
        }

        Ok(Self {
            season_length,
            offset,
            observations: y.to_vec(),
            initial_level: a0,
            initial_trend: b0,
            level,
            trend,
            seasonal,
            fitted,
        })
    }

    /// Forecast `steps` periods past the last observation (`steps >= 1`)
    pub fn forecast(&self, steps: usize) -> Result<f64> {
        if steps == 0 {
            return Err(MathError::InvalidInput(
                "Forecast steps must be at least 1".to_string(),
            ));
        }

        let index = self.observations.len() + (steps - 1) % self.season_length;
        Ok((self.level + self.trend * steps as f64) * self.seasonal[index])
    }

    /// Forecasts for steps `1..=horizon`
    pub fn forecast_horizon(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|step| {
                let index = self.observations.len() + (step - 1) % self.season_length;
                (self.level + self.trend * step as f64) * self.seasonal[index]
            })
            .collect()
    }

    /// Forecasts for one full season ahead
    pub fn next_season(&self) -> Vec<f64> {
        self.forecast_horizon(self.season_length)
    }

    /// Season length the model was fitted with
    pub fn season_length(&self) -> usize {
        self.season_length
    }

    /// Index into the input values where the analysis window starts
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Observations inside the analysis window
    pub fn observations(&self) -> &[f64] {
        &self.observations
    }

    /// Level and trend before the smoothing pass
    pub fn initial_state(&self) -> (f64, f64) {
        (self.initial_level, self.initial_trend)
    }

    /// Final smoothed level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Final smoothed trend
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// All seasonal indices, the initial season followed by one per observation
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal
    }

    /// Fitted values over the analysis window
    pub fn fitted(&self) -> &[f64] {
        &self.fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn params() -> SmoothingParams {
        SmoothingParams::new(0.7, 0.7, 0.7)
    }

    #[test]
    fn test_too_few_values() {
        let result = SeasonalDecomposition::fit(&[4.0, 4.1, 4.2], 2, 10, params());
        assert!(matches!(result, Err(MathError::InsufficientData(_))));
    }

    #[test]
    fn test_zero_season_length() {
        let result = SeasonalDecomposition::fit(&[4.0, 4.1, 4.2], 0, 10, params());
        assert!(matches!(result, Err(MathError::InvalidInput(_))));
    }

    #[test]
    fn test_linear_trend_converges() {
        let values: Vec<f64> = (0..12).map(|i| 1.0 + 0.5 * i as f64).collect();
        let model = SeasonalDecomposition::fit(&values, 1, 10, params()).unwrap();

        assert_eq!(model.offset(), 2);
        assert_eq!(model.observations().len(), 10);
        assert_approx_eq!(model.level(), 6.4497, 1e-3);
        assert_approx_eq!(model.trend(), 0.4961, 1e-3);
        assert_approx_eq!(model.forecast(1).unwrap(), 7.0, 1e-3);
        assert_approx_eq!(model.forecast(3).unwrap(), 8.0, 1e-3);
    }

    #[test]
    fn test_initial_level_is_centred_on_first_season() {
        let values: Vec<f64> = (0..12).map(|i| 1.0 + 0.5 * i as f64).collect();
        let model = SeasonalDecomposition::fit(&values, 1, 10, params()).unwrap();

        // first season mean 2.0 sits at time 1.5, one trend step of 0.5 per period
        let (level, trend) = model.initial_state();
        assert_approx_eq!(level, 1.25);
        assert_approx_eq!(trend, 0.5);

        let values = [4.0, 4.2, 3.9, 4.1, 4.3, 4.0];
        let model = SeasonalDecomposition::fit(&values, 3, 10, params()).unwrap();
        let (level, trend) = model.initial_state();
        // season means differ by 0.1 over three periods; the first one sits at time 2.5
        assert_approx_eq!(trend, 0.1 / 3.0);
        assert_approx_eq!(level, 12.1 / 3.0 - 2.5 * 0.1 / 3.0);
    }

    #[test]
    fn test_window_is_trimmed_to_whole_seasons() {
        let values = [4.0, 4.2, 3.9, 4.1, 4.3, 4.0, 4.4];
        let model = SeasonalDecomposition::fit(&values, 3, 2, params()).unwrap();

        // window grows to 6, then the oldest value is dropped
        assert_eq!(model.offset(), 1);
        assert_eq!(model.observations(), &values[1..]);
        assert_eq!(model.seasonal_indices().len(), 9);
        assert_eq!(model.fitted().len(), 6);
    }

    #[test]
    fn test_initial_seasonal_indices_are_normalised() {
        let values = [4.0, 4.6, 4.0, 4.6, 4.0, 4.6];
        let model = SeasonalDecomposition::fit(&values, 2, 10, params()).unwrap();

        let initial: f64 = model.seasonal_indices()[..2].iter().sum();
        assert_approx_eq!(initial, 2.0);
    }

    #[test]
    fn test_alternating_series_forecasts_next_season() {
        let values = [4.0, 4.6, 4.0, 4.6, 4.0, 4.6, 4.0, 4.6, 4.0, 4.6, 4.0, 4.6];
        let model = SeasonalDecomposition::fit(&values, 2, 10, params()).unwrap();

        let season = model.next_season();
        assert_eq!(season.len(), 2);
        assert_approx_eq!(season[0], 4.0, 1e-9);
        assert_approx_eq!(season[1], 4.6, 1e-9);
        assert_eq!(model.forecast_horizon(4).len(), 4);
    }

    #[test]
    fn test_zero_series_yields_non_finite_forecast() {
        let model = SeasonalDecomposition::fit(&[0.0; 8], 1, 10, params()).unwrap();
        assert!(model.next_season().iter().all(|v| !v.is_finite()));
    }
}
