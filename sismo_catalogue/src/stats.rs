//! Distribution tables over a catalogue
//!
//! Each table carries the year span of the catalogue it was built from and
//! renders as plain text.

use crate::catalogue::Catalogue;
use crate::region::Region;
use crate::{CatalogueError, Result};
use chrono::Month;
use serde::Serialize;
use std::fmt;

/// Upper bound of the "weak" magnitude bucket (exclusive)
pub const WEAK_MAGNITUDE: f64 = 3.5;
/// Upper bound of the "moderate" magnitude bucket (inclusive)
pub const MODERATE_MAGNITUDE: f64 = 5.0;

/// Labels of the magnitude buckets, weakest first
pub const MAGNITUDE_BUCKETS: [&str; 3] = ["< 3.5", "3.5 - 5", "> 5"];

/// Event counts per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub title: String,
    pub first_year: i32,
    pub last_year: i32,
    pub counts: Vec<(String, usize)>,
}

/// Event counts per region, split by magnitude bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeDistribution {
    pub title: String,
    pub first_year: i32,
    pub last_year: i32,
    pub rows: Vec<(Region, [usize; 3])>,
}

impl Distribution {
    /// Total number of events counted
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Count for a category label
    pub fn count(&self, label: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, count)| *count)
    }
}

fn year_span(catalogue: &Catalogue) -> Result<(i32, i32)> {
    match (catalogue.first_year(), catalogue.last_year()) {
        (Some(first), Some(last)) => Ok((first, last)),
        _ => Err(CatalogueError::EmptyCatalogue(
            "cannot build a distribution from an empty catalogue".to_string(),
        )),
    }
}

/// Number of events per region
pub fn region_distribution(catalogue: &Catalogue) -> Result<Distribution> {
    let (first_year, last_year) = year_span(catalogue)?;

    let counts = Region::ALL
        .iter()
        .map(|region| {
            (
                region.display_name().to_string(),
                catalogue.by_region(&[*region]).len(),
            )
        })
        .collect();

    Ok(Distribution {
        title: format!(
            "Earthquakes in Chile, distribution by regions, {} - {}",
            first_year, last_year
        ),
        first_year,
        last_year,
        counts,
    })
}

/// Number of events per calendar month
pub fn month_distribution(catalogue: &Catalogue) -> Result<Distribution> {
    let (first_year, last_year) = year_span(catalogue)?;

    let counts = (1..=12u32)
        .map(|month| {
            let name = Month::try_from(month as u8)
                .map(|m| m.name().to_string())
                .unwrap_or_else(|_| month.to_string());
            (name, catalogue.by_month(month).len())
        })
        .collect();

    Ok(Distribution {
        title: format!(
            "Earthquakes in Chile, distribution by month, {} - {}",
            first_year, last_year
        ),
        first_year,
        last_year,
        counts,
    })
}

/// Number of events per region in each magnitude bucket
pub fn magnitude_distribution(catalogue: &Catalogue) -> Result<MagnitudeDistribution> {
    let (first_year, last_year) = year_span(catalogue)?;

    let rows = Region::ALL
        .iter()
        .map(|region| {
            let buckets = [
                catalogue
                    .by_region_magnitude_below(*region, WEAK_MAGNITUDE)
                    .len(),
                catalogue
                    .by_region_magnitude_between(*region, WEAK_MAGNITUDE, MODERATE_MAGNITUDE)
                    .len(),
                catalogue
                    .by_region_magnitude_above(*region, MODERATE_MAGNITUDE)
                    .len(),
            ];
            (*region, buckets)
        })
        .collect();

    Ok(MagnitudeDistribution {
        title: format!(
            "Earthquakes in Chile, distribution by magnitude, {} - {}",
            first_year, last_year
        ),
        first_year,
        last_year,
        rows,
    })
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (label, count) in &self.counts {
            writeln!(f, "  {:<24} {:>6}", label, count)?;
        }
        Ok(())
    }
}

impl fmt::Display for MagnitudeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "  {:<24} {:>8} {:>8} {:>8}",
            "Region", MAGNITUDE_BUCKETS[0], MAGNITUDE_BUCKETS[1], MAGNITUDE_BUCKETS[2]
        )?;
        for (region, buckets) in &self.rows {
            writeln!(
                f,
                "  {:<24} {:>8} {:>8} {:>8}",
                region.display_name(),
                buckets[0],
                buckets[1],
                buckets[2]
            )?;
        }
        Ok(())
    }
}
