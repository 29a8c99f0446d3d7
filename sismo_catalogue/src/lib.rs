//! # Sismo Catalogue
//!
//! `sismo_catalogue` holds the historical record of seismic events that the
//! forecasting crates work from.
//!
//! ## Contents
//!
//! - **Events**: [`Event`] records with region, time, magnitude, scale and location
//! - **Regions**: the [`Region`] enumeration and the [`RegionTable`] used to map
//!   free-text region names from feeds onto it
//! - **Catalogue**: a deduplicating [`Catalogue`] with region, month and magnitude filters
//! - **Snapshots**: a semicolon separated CSV codec and a cache-aware [`CatalogueLoader`]
//! - **Statistics**: distribution tables by region, magnitude and month
//!
//! ## Usage Example
//!
//! ```no_run
//! use sismo_catalogue::{CatalogueLoader, Region};
//!
//! let catalogue = CatalogueLoader::new("earthquakes.base")
//!     .with_snapshot("data/snapshot.csv")
//!     .load()
//!     .unwrap();
//!
//! let maule = catalogue.by_region(&[Region::Maule]);
//! println!("{} events in {}", maule.len(), Region::Maule);
//! ```

use thiserror::Error;

pub mod catalogue;
pub mod codec;
pub mod event;
pub mod loader;
pub mod region;
pub mod stats;
pub mod utils;

pub use catalogue::Catalogue;
pub use event::{Event, ScaleType};
pub use loader::CatalogueLoader;
pub use region::{Region, RegionTable};

/// Errors that can occur while building or reading a catalogue
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Unknown region name: {0}")]
    UnknownRegion(String),

    #[error("Unknown magnitude scale: {0}")]
    UnknownScale(String),

    #[error("Empty catalogue: {0}")]
    EmptyCatalogue(String),
}

/// Result type for catalogue operations
pub type Result<T> = std::result::Result<T, CatalogueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogueError::Parse {
            line: 7,
            message: "bad magnitude".to_string(),
        };
        assert_eq!(err.to_string(), "Parse error on line 7: bad magnitude");

        let err = CatalogueError::UnknownRegion("ATLANTIS".to_string());
        assert!(err.to_string().contains("ATLANTIS"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = CatalogueError::from(io);
        assert!(matches!(err, CatalogueError::Io(_)));
    }
}
