//! # Sismo Forecast
//!
//! Seasonal forecasting of the next seismic event in a region.
//!
//! ## Features
//!
//! - Timestamped sample series that never reorder on read ([`EventSeries`])
//! - A Holt-Winters seasonal smoother with autocorrelation based season
//!   length inference ([`HoltWinters`])
//! - Per-region orchestration over an event catalogue ([`Forecaster`])
//! - JSON configuration of the smoothing coefficients ([`ForecastConfig`])
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use sismo_catalogue::utils::periodic_events;
//! use sismo_catalogue::Region;
//! use sismo_forecast::Forecaster;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let events = periodic_events(Region::Maule, &[4.0, 4.6], 6, start, Duration::days(1));
//!
//! let forecaster = Forecaster::new();
//! let now = start + Duration::days(12);
//! if let Some(forecast) = forecaster.forecast_for_region_at(events.as_slice(), Region::Maule, now) {
//!     println!("{} {}", forecast.timestamp, forecast.magnitude);
//! }
//! ```

pub mod config;
pub mod error;
pub mod forecaster;
pub mod models;
pub mod series;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::error::ForecastError;
pub use crate::forecaster::{EventSource, Forecaster, QuakeForecast, RegionForecast};
pub use crate::models::holt_winters::{HoltWinters, TrainedHoltWinters};
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::series::{EventSeries, Sample};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
