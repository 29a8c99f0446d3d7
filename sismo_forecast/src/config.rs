//! Forecast configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default value of the three smoothing coefficients
pub const DEFAULT_COEFFICIENT: f64 = 0.7;
/// Default number of recent samples fitted
pub const DEFAULT_WINDOW: usize = 10;

/// Settings for the seasonal smoother.
///
/// Missing fields in a JSON file fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Level smoothing coefficient
    pub alpha: f64,
    /// Trend smoothing coefficient
    pub beta: f64,
    /// Seasonal smoothing coefficient
    pub gamma: f64,
    /// Number of most recent samples to fit
    pub window: usize,
    /// Fixed season length; inferred from the data when absent
    pub season_length: Option<usize>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_COEFFICIENT,
            beta: DEFAULT_COEFFICIENT,
            gamma: DEFAULT_COEFFICIENT,
            window: DEFAULT_WINDOW,
            season_length: None,
        }
    }
}

impl ForecastConfig {
    /// Read and validate a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: ForecastConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all coefficients are finite and within `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if self.season_length == Some(0) {
            return Err(ForecastError::InvalidParameter(
                "season_length must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
