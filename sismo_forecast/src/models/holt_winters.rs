//! Holt-Winters seasonal smoothing over event series
//!
//! The season length is inferred from the autocorrelation of the series
//! unless it is fixed in the configuration. Samples are used in time order;
//! the step between forecast periods is the mean gap between samples.

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::models::{ErrorMetrics, ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::{EventSeries, Sample};
use chrono::{DateTime, Duration, Utc};
use sismo_math::smoothing::{SeasonalDecomposition, SmoothingParams};
use sismo_math::{extract_forecast_value, infer_season_length, mean};
use tracing::debug;

/// Seasonal exponential smoothing model
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    /// Coefficients, window and optional season length
    config: ForecastConfig,
}

/// Statistics of the series a model was trained on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    /// Number of samples
    pub count: usize,
    /// Mean sample value
    pub mean_value: f64,
    /// Mean time between consecutive samples
    pub mean_gap: Duration,
    /// Season length used for smoothing
    pub season_length: usize,
}

/// Trained Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    /// Name of the model
    name: String,
    /// Training samples in time order
    series: EventSeries,
    stats: SeriesStats,
    decomposition: SeasonalDecomposition,
}

impl HoltWinters {
    /// Create a new model with the given coefficients and window
    pub fn new(alpha: f64, beta: f64, gamma: f64, window: usize) -> Result<Self> {
        Self::from_config(ForecastConfig {
            alpha,
            beta,
            gamma,
            window,
            season_length: None,
        })
    }

    /// Create a model from a configuration
    pub fn from_config(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::unchecked(config))
    }

    fn unchecked(config: ForecastConfig) -> Self {
        Self {
            name: format!(
                "Holt-Winters (alpha={}, beta={}, gamma={}, window={})",
                config.alpha, config.beta, config.gamma, config.window
            ),
            config,
        }
    }

    /// Fix the season length instead of inferring it
    pub fn with_season_length(self, season_length: usize) -> Result<Self> {
        Self::from_config(ForecastConfig {
            season_length: Some(season_length),
            ..self.config
        })
    }

    /// Configuration of this model
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }
}

impl Default for HoltWinters {
    fn default() -> Self {
        Self::unchecked(ForecastConfig::default())
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn train(&self, series: &EventSeries) -> Result<Self::Trained> {
        if series.is_empty() {
            return Err(ForecastError::InsufficientData(
                "Empty event series".to_string(),
            ));
        }

        let series = series.sorted();
        let values = series.values();
        let season_length = self
            .config
            .season_length
            .unwrap_or_else(|| infer_season_length(&values));

        let stats = SeriesStats {
            count: values.len(),
            mean_value: mean(&values),
            mean_gap: series.mean_gap(),
            season_length,
        };

        let params = SmoothingParams::new(self.config.alpha, self.config.beta, self.config.gamma);
        let decomposition =
            SeasonalDecomposition::fit(&values, season_length, self.config.window, params)?;

        debug!(
            count = stats.count,
            season_length,
            window = decomposition.observations().len(),
            level = decomposition.level(),
            trend = decomposition.trend(),
            "Holt-Winters fitted"
        );

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            series,
            stats,
            decomposition,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltWinters {
    /// Statistics of the training series
    pub fn stats(&self) -> &SeriesStats {
        &self.stats
    }

    /// Season length used for smoothing
    pub fn season_length(&self) -> usize {
        self.stats.season_length
    }

    /// Final smoothed level
    pub fn level(&self) -> f64 {
        self.decomposition.level()
    }

    /// Final smoothed trend
    pub fn trend(&self) -> f64 {
        self.decomposition.trend()
    }

    /// Underlying smoothing state
    pub fn decomposition(&self) -> &SeasonalDecomposition {
        &self.decomposition
    }

    /// Timestamp of the latest training sample
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.series.last().map(|sample| sample.timestamp)
    }

    /// Forecast one period past the latest sample.
    ///
    /// Returns `None` when the forecast holds no finite non-zero value.
    pub fn predict_next(&self) -> Result<Option<Sample>> {
        let last = self.require_last()?;
        let value = extract_forecast_value(&self.decomposition.next_season(), 0);
        if value == 0.0 {
            return Ok(None);
        }

        Ok(Some(Sample::new(last + self.stats.mean_gap, value)))
    }

    /// Forecast the period containing `target`.
    ///
    /// The number of whole mean gaps between the latest sample and `target`
    /// gives the forecast step `k`; the returned sample is dated `k` gaps
    /// after the latest sample. Returns `None` when no finite non-zero value
    /// is available from that step on.
    pub fn predict_at(&self, target: DateTime<Utc>) -> Result<Option<Sample>> {
        let last = self.require_last()?;
        let gap = self.stats.mean_gap.num_milliseconds();
        if gap <= 0 {
            return Err(ForecastError::InvalidParameter(
                "Cannot step forward: samples have no time spread".to_string(),
            ));
        }

        let steps = (target - last).num_milliseconds() / gap;
        if steps < 1 {
            return Err(ForecastError::InvalidParameter(format!(
                "Target {} is less than one period after the last sample {}",
                target, last
            )));
        }

        let too_far =
            || ForecastError::InvalidParameter(format!("Target {} is too far ahead", target));
        let timestamp = gap
            .checked_mul(steps)
            .map(Duration::milliseconds)
            .and_then(|offset| last.checked_add_signed(offset))
            .ok_or_else(too_far)?;
        let first = usize::try_from(steps).map_err(|_| too_far())?;
        let until = first.max(self.stats.season_length);

        // only the steps the extraction can reach: `first` up to the end of
        // the forecast season
        let values = (first..=until)
            .map(|step| self.decomposition.forecast(step))
            .collect::<sismo_math::Result<Vec<f64>>>()?;
        let value = extract_forecast_value(&values, 0);
        if value == 0.0 {
            return Ok(None);
        }

        Ok(Some(Sample::new(timestamp, value)))
    }

    /// Error of the fitted values against the observations they were fitted to
    pub fn in_sample_error(&self) -> Result<ErrorMetrics> {
        ErrorMetrics::between(self.decomposition.fitted(), self.decomposition.observations())
    }

    fn require_last(&self) -> Result<DateTime<Utc>> {
        self.last_timestamp()
            .ok_or_else(|| ForecastError::InsufficientData("Empty event series".to_string()))
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let last = self.require_last()?;
        let values = self.decomposition.forecast_horizon(horizon);
        let timestamps = (1..=horizon)
            .map(|step| {
                i32::try_from(step)
                    .ok()
                    .and_then(|step| self.stats.mean_gap.checked_mul(step))
                    .and_then(|offset| last.checked_add_signed(offset))
                    .ok_or_else(|| {
                        ForecastError::InvalidParameter(format!(
                            "Forecast step {} is out of range",
                            step
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        ForecastResult::new(values, horizon)?.with_timestamps(timestamps)
    }

    fn fitted(&self) -> &[f64] {
        self.decomposition.fitted()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
