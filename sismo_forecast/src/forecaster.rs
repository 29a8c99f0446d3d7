//! Per-region forecasting on top of an event catalogue

use crate::config::ForecastConfig;
use crate::error::Result;
use crate::models::holt_winters::HoltWinters;
use crate::models::ForecastModel;
use crate::series::{EventSeries, Sample};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sismo_catalogue::{Catalogue, Event, Region, RegionTable};
use std::fmt;
use tracing::{info, warn};

/// Anything that can list the events recorded in a region
pub trait EventSource {
    /// Events attributed to `region`
    fn events_in_region(&self, region: Region) -> Vec<&Event>;
}

impl EventSource for Catalogue {
    fn events_in_region(&self, region: Region) -> Vec<&Event> {
        self.by_region(&[region])
    }
}

impl EventSource for [Event] {
    fn events_in_region(&self, region: Region) -> Vec<&Event> {
        self.iter().filter(|event| event.region == region).collect()
    }
}

/// Estimated next event for a region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuakeForecast {
    /// Estimated time of the next event
    pub timestamp: DateTime<Utc>,
    /// Estimated magnitude, one decimal place
    pub magnitude: f64,
}

/// Forecast together with the region it was made for
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionForecast {
    pub region: Region,
    pub forecast: QuakeForecast,
}

impl fmt::Display for RegionForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Nearest possible earthquake in {}: {} {}",
            self.region,
            self.forecast.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.forecast.magnitude
        )
    }
}

/// Turns the events of a region into a single next-event forecast.
///
/// Every forecast appends a zero-magnitude sample at the forecast time to
/// the region's events, so the forecast step is measured up to "now".
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    model: HoltWinters,
}

impl Forecaster {
    /// Create a forecaster with the default coefficients
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecaster from a configuration
    pub fn from_config(config: ForecastConfig) -> Result<Self> {
        Ok(Self {
            model: HoltWinters::from_config(config)?,
        })
    }

    /// Model used for forecasting
    pub fn model(&self) -> &HoltWinters {
        &self.model
    }

    /// Magnitude series of `region`'s events plus the zero-valued anchor at `now`
    pub fn series_for_region<S>(source: &S, region: Region, now: DateTime<Utc>) -> EventSeries
    where
        S: EventSource + ?Sized,
    {
        let mut series: EventSeries = source
            .events_in_region(region)
            .into_iter()
            .map(|event| Sample::new(event.timestamp, event.magnitude))
            .collect();
        series.push(Sample::new(now, 0.0));
        series
    }

    /// Forecast the next event in `region`, anchored at the current time
    pub fn forecast_for_region<S>(&self, source: &S, region: Region) -> Option<QuakeForecast>
    where
        S: EventSource + ?Sized,
    {
        self.forecast_for_region_at(source, region, Utc::now())
    }

    /// Forecast the next event in `region`, anchored at `now`.
    ///
    /// Returns `None` when the region has too little history or the model
    /// yields no usable value; the reason is logged.
    pub fn forecast_for_region_at<S>(
        &self,
        source: &S,
        region: Region,
        now: DateTime<Utc>,
    ) -> Option<QuakeForecast>
    where
        S: EventSource + ?Sized,
    {
        let series = Self::series_for_region(source, region, now);

        match self.predict(&series) {
            Ok(Some(sample)) => {
                info!(
                    region = %region,
                    timestamp = %sample.timestamp,
                    magnitude = sample.value,
                    "forecast produced"
                );
                Some(QuakeForecast {
                    timestamp: sample.timestamp,
                    magnitude: sample.value,
                })
            }
            Ok(None) => {
                warn!(region = %region, samples = series.len(), "no usable forecast value");
                None
            }
            Err(err) => {
                warn!(region = %region, samples = series.len(), error = %err, "could not forecast region");
                None
            }
        }
    }

    /// Forecast every region of `regions`, skipping those without a forecast
    pub fn forecast_all<S>(&self, source: &S, regions: &RegionTable) -> Vec<RegionForecast>
    where
        S: EventSource + ?Sized,
    {
        self.forecast_all_at(source, regions, Utc::now())
    }

    /// Forecast every region of `regions` with a shared anchor time
    pub fn forecast_all_at<S>(
        &self,
        source: &S,
        regions: &RegionTable,
        now: DateTime<Utc>,
    ) -> Vec<RegionForecast>
    where
        S: EventSource + ?Sized,
    {
        regions
            .regions()
            .filter_map(|region| {
                self.forecast_for_region_at(source, region, now)
                    .map(|forecast| RegionForecast { region, forecast })
            })
            .collect()
    }

    fn predict(&self, series: &EventSeries) -> Result<Option<Sample>> {
        self.model.train(series)?.predict_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use sismo_catalogue::utils::periodic_events;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_series_ends_with_anchor() {
        let events = periodic_events(Region::Maule, &[4.0, 4.6], 2, t0(), Duration::days(1));
        let now = t0() + Duration::days(10);

        let series = Forecaster::series_for_region(events.as_slice(), Region::Maule, now);
        assert_eq!(series.len(), 5);
        assert_eq!(series.last().unwrap(), &Sample::new(now, 0.0));

        let other = Forecaster::series_for_region(events.as_slice(), Region::Biobio, now);
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_region_without_events_has_no_forecast() {
        let events: Vec<Event> = Vec::new();
        let forecaster = Forecaster::new();
        assert_eq!(
            forecaster.forecast_for_region(events.as_slice(), Region::Aysen),
            None
        );
    }

    #[test]
    fn test_alternating_region_forecast() {
        let events = periodic_events(Region::Maule, &[4.0, 4.6], 6, t0(), Duration::days(1));
        let now = t0() + Duration::days(12);

        let forecast = Forecaster::new()
            .forecast_for_region_at(events.as_slice(), Region::Maule, now)
            .unwrap();

        assert_eq!(forecast.timestamp, now + Duration::days(1));
        assert_eq!(forecast.magnitude, 0.9);
    }

    #[test]
    fn test_display() {
        let forecast = RegionForecast {
            region: Region::Biobio,
            forecast: QuakeForecast {
                timestamp: t0(),
                magnitude: 4.3,
            },
        };
        assert_eq!(
            forecast.to_string(),
            "Nearest possible earthquake in Bio-Bio: 2024-01-01 00:00:00 4.3"
        );
    }
}
