//! Seismic event records

use crate::region::Region;
use crate::{CatalogueError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Timestamp format used in reports and snapshots
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Magnitude scale an event was measured on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleType {
    /// Local (Richter) magnitude
    ML,
    /// Body-wave magnitude
    MB,
    /// Surface-wave magnitude
    MS,
    /// Moment magnitude
    MW,
}

impl ScaleType {
    /// Scale tag as written in snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleType::ML => "ML",
            ScaleType::MB => "MB",
            ScaleType::MS => "MS",
            ScaleType::MW => "MW",
        }
    }
}

impl FromStr for ScaleType {
    type Err = CatalogueError;

    /// Parse a scale tag. A bare `M` or an empty tag means local magnitude.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "" | "M" | "ML" => Ok(ScaleType::ML),
            "MB" => Ok(ScaleType::MB),
            "MS" => Ok(ScaleType::MS),
            "MW" => Ok(ScaleType::MW),
            other => Err(CatalogueError::UnknownScale(other.to_string())),
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded seismic event.
///
/// Two events are the same event when time, region and magnitude match;
/// location, depth and scale are not compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Region the event was attributed to
    pub region: Region,
    /// Origin time
    pub timestamp: DateTime<Utc>,
    /// Magnitude on `scale`
    pub magnitude: f64,
    /// Magnitude scale
    pub scale: ScaleType,
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Depth in kilometres
    pub depth: f64,
}

impl Event {
    /// Create an event with no location information
    pub fn new(region: Region, timestamp: DateTime<Utc>, magnitude: f64) -> Self {
        Self {
            region,
            timestamp,
            magnitude,
            scale: ScaleType::ML,
            longitude: 0.0,
            latitude: 0.0,
            depth: 0.0,
        }
    }

    /// Set the magnitude scale
    pub fn with_scale(mut self, scale: ScaleType) -> Self {
        self.scale = scale;
        self
    }

    /// Set latitude, longitude and depth
    pub fn with_location(mut self, latitude: f64, longitude: f64, depth: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self.depth = depth;
        self
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
            && self.region == other.region
            && self.magnitude.to_bits() == other.magnitude.to_bits()
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timestamp.hash(state);
        self.region.hash(state);
        self.magnitude.to_bits().hash(state);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{} {} lng: {} lat: {}",
            self.timestamp.format(DATE_TIME_FORMAT),
            self.region.code(),
            self.magnitude,
            self.scale,
            self.depth,
            self.longitude,
            self.latitude
        )
    }
}
