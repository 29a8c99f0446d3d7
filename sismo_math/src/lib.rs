//! # Sismo Math
//!
//! Numeric building blocks for seasonal forecasting of event series.
//! This crate works on plain `f64` slices and knows nothing about
//! timestamps, regions or catalogues.

use thiserror::Error;

pub mod autocorrelation;
pub mod rounding;
pub mod smoothing;

pub use autocorrelation::{autocorrelation, infer_season_length, mean};
pub use rounding::{extract_forecast_value, round_half_up};
pub use smoothing::SeasonalDecomposition;

/// Errors that can occur in series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;
