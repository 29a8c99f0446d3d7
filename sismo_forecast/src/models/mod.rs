//! Forecasting models for event series

use crate::error::{ForecastError, Result};
use crate::series::{EventSeries, Sample};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Debug;

/// Forecast result containing predicted values
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    /// Forecasted values
    pub(crate) values: Vec<f64>,
    /// Number of periods forecasted
    horizons: usize,
    /// Timestamps of the forecasted periods (optional)
    pub(crate) timestamps: Option<Vec<DateTime<Utc>>>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self {
            values,
            horizons,
            timestamps: None,
        })
    }

    /// Attach one timestamp per forecasted period
    pub fn with_timestamps(mut self, timestamps: Vec<DateTime<Utc>>) -> Result<Self> {
        if timestamps.len() != self.horizons {
            return Err(ForecastError::DataError(format!(
                "Timestamps length ({}) doesn't match horizons ({})",
                timestamps.len(),
                self.horizons
            )));
        }

        self.timestamps = Some(timestamps);
        Ok(self)
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    /// Get the timestamps, if available
    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }

    /// Forecast as a series of samples, empty when no timestamps are attached
    pub fn to_series(&self) -> EventSeries {
        self.timestamps
            .iter()
            .flatten()
            .zip(self.values.iter())
            .map(|(timestamp, value)| Sample::new(*timestamp, *value))
            .collect()
    }
}

/// Error metrics for forecast evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over non-zero actual values
    pub mape: f64,
}

impl ErrorMetrics {
    /// Compare predicted values with actual values
    pub fn between(predicted: &[f64], actual: &[f64]) -> Result<Self> {
        if predicted.len() != actual.len() || predicted.is_empty() {
            return Err(ForecastError::DataError(
                "Predicted and actual values must have the same non-zero length".to_string(),
            ));
        }

        let n = predicted.len() as f64;
        let errors: Vec<f64> = predicted
            .iter()
            .zip(actual.iter())
            .map(|(p, a)| a - p)
            .collect();

        let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
        let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;

        let percentage: Vec<f64> = actual
            .iter()
            .zip(errors.iter())
            .filter(|(a, _)| **a != 0.0)
            .map(|(a, e)| (e.abs() / a.abs()) * 100.0)
            .collect();
        let mape = if percentage.is_empty() {
            0.0
        } else {
            percentage.iter().sum::<f64>() / percentage.len() as f64
        };

        Ok(Self {
            mae,
            mse,
            rmse: mse.sqrt(),
            mape,
        })
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Fitted values over the observations the model was trained on
    fn fitted(&self) -> &[f64];

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on an event series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on an event series
    fn train(&self, series: &EventSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod holt_winters;
