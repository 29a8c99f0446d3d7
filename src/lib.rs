//! # Sismo
//!
//! `sismo_workspace` bundles the seismic forecasting crates behind one
//! dependency.
//!
//! - [`math`]: autocorrelation, seasonal smoothing and rounding
//! - [`catalogue`]: events, regions, snapshots and distribution tables
//! - [`forecast`]: event series, the Holt-Winters model and per-region forecasts
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use sismo_workspace::catalogue::{utils::periodic_events, Catalogue, Region};
//! use sismo_workspace::forecast::Forecaster;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let catalogue: Catalogue =
//!     periodic_events(Region::Maule, &[4.0, 4.6], 6, start, Duration::days(1))
//!         .into_iter()
//!         .collect();
//!
//! let forecast = Forecaster::new()
//!     .forecast_for_region_at(&catalogue, Region::Maule, start + Duration::days(12))
//!     .unwrap();
//! assert_eq!(forecast.magnitude, 0.9);
//! ```

pub use sismo_catalogue as catalogue;
pub use sismo_forecast as forecast;
pub use sismo_math as math;

pub use sismo_catalogue::{Catalogue, Event, Region, RegionTable};
pub use sismo_forecast::{EventSeries, Forecaster, QuakeForecast, Sample};
