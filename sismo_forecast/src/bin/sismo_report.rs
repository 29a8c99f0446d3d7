//! Prints catalogue distributions and the nearest forecast for every region.
//!
//! Configured through environment variables:
//!
//! - `SISMO_CATALOGUE`: snapshot CSV read when no cache exists
//! - `SISMO_FEED`: CSV of recent events merged into the catalogue and cache
//! - `SISMO_CACHE`: cache file, `$HOME/earthquakes.base` by default
//! - `SISMO_FORECAST_CONFIG`: JSON file with smoothing settings
//! - `SISMO_MIN_MAGNITUDE`: ignore weaker events when forecasting
//!
//! Without a snapshot, a feed or an existing cache a synthetic catalogue is
//! used.

use sismo_catalogue::stats::{magnitude_distribution, month_distribution, region_distribution};
use sismo_catalogue::utils::generate_test_catalogue;
use sismo_catalogue::{Catalogue, CatalogueLoader, Region, RegionTable};
use sismo_forecast::{ForecastConfig, ForecastError, Forecaster};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SYNTHETIC_EVENTS: usize = 500;
const SYNTHETIC_SEED: u64 = 42;

#[derive(Debug)]
struct ReportConfig {
    snapshot: Option<PathBuf>,
    feed: Option<PathBuf>,
    cache: PathBuf,
    forecast_config: Option<PathBuf>,
    min_magnitude: Option<f64>,
}

impl ReportConfig {
    fn from_env() -> Result<Self, ForecastError> {
        Self::from_vars(|name| env::var_os(name))
    }

    fn from_vars<F>(var: F) -> Result<Self, ForecastError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let cache = var("SISMO_CACHE").map(PathBuf::from).unwrap_or_else(|| {
            var("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join("earthquakes.base")
        });

        let min_magnitude = match var("SISMO_MIN_MAGNITUDE") {
            Some(raw) => {
                let raw = raw.to_string_lossy();
                Some(raw.trim().parse::<f64>().map_err(|err| {
                    ForecastError::InvalidParameter(format!("SISMO_MIN_MAGNITUDE={}: {}", raw, err))
                })?)
            }
            None => None,
        };

        Ok(Self {
            snapshot: var("SISMO_CATALOGUE").map(PathBuf::from),
            feed: var("SISMO_FEED").map(PathBuf::from),
            cache,
            forecast_config: var("SISMO_FORECAST_CONFIG").map(PathBuf::from),
            min_magnitude,
        })
    }

    fn load_catalogue(&self, regions: &RegionTable) -> Result<Catalogue, ForecastError> {
        if self.snapshot.is_none() && self.feed.is_none() && !self.cache.exists() {
            warn!(
                events = SYNTHETIC_EVENTS,
                "no catalogue configured, using a synthetic one"
            );
            return Ok(generate_test_catalogue(SYNTHETIC_EVENTS, SYNTHETIC_SEED));
        }

        let mut loader = CatalogueLoader::new(&self.cache).with_regions(regions.clone());
        if let Some(snapshot) = &self.snapshot {
            loader = loader.with_snapshot(snapshot);
        }
        if let Some(feed) = &self.feed {
            loader = loader.with_feed(feed);
        }
        Ok(loader.load()?)
    }

    fn forecaster(&self) -> Result<Forecaster, ForecastError> {
        match &self.forecast_config {
            Some(path) => Forecaster::from_config(ForecastConfig::from_json_file(path)?),
            None => Ok(Forecaster::new()),
        }
    }
}

fn run() -> Result<(), ForecastError> {
    let config = ReportConfig::from_env()?;
    info!(?config, "starting report");

    let regions = RegionTable::new();
    let catalogue = config.load_catalogue(&regions)?;

    println!("{}", region_distribution(&catalogue)?);
    println!("{}", magnitude_distribution(&catalogue)?);
    println!("{}", month_distribution(&catalogue)?);

    let catalogue = match config.min_magnitude {
        Some(limit) => catalogue
            .iter()
            .filter(|event| event.magnitude >= limit)
            .cloned()
            .collect(),
        None => catalogue,
    };

    let forecaster = config.forecaster()?;
    let forecasts = forecaster.forecast_all(&catalogue, &regions);
    for forecast in &forecasts {
        println!("{}", forecast);
    }

    info!(
        regions = forecasts.len(),
        total = Region::ALL.len(),
        "forecasts produced"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "sismo_report=info,sismo_forecast=info,sismo_catalogue=info".into()
            }),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "report failed");
            ExitCode::FAILURE
        }
    }
}
