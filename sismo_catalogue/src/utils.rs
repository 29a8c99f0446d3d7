//! Synthetic catalogues for demos and tests

use crate::catalogue::Catalogue;
use crate::event::{Event, ScaleType};
use crate::region::Region;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate a reproducible random catalogue
///
/// # Arguments
/// * `count` - Number of events to generate
/// * `seed` - Seed for the random generator; equal seeds give equal catalogues
///
/// # Returns
/// * Catalogue of events spread over all regions, starting 2010-01-01
pub fn generate_test_catalogue(count: usize, seed: u64) -> Catalogue {
    let mut rng = StdRng::seed_from_u64(seed);
    let scales = [ScaleType::ML, ScaleType::MB, ScaleType::MS, ScaleType::MW];

    let mut timestamp = Utc
        .with_ymd_and_hms(2010, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default();

    let mut catalogue = Catalogue::new();
    while catalogue.len() < count {
        timestamp += Duration::minutes(rng.gen_range(30..4320));

        let region = Region::ALL[rng.gen_range(0..Region::ALL.len())];
        // one decimal place, as published by seismic agencies
        let magnitude = (rng.gen_range(25..75) as f64) / 10.0;
        let event = Event::new(region, timestamp, magnitude)
            .with_scale(scales[rng.gen_range(0..scales.len())])
            .with_location(
                rng.gen_range(-55.0..-17.5),
                rng.gen_range(-76.0..-66.0),
                rng.gen_range(5.0..180.0),
            );

        catalogue.insert(event);
    }

    catalogue
}

/// Events for one region whose magnitudes repeat `pattern` for `cycles`
/// cycles, one event every `step` starting at `start`
pub fn periodic_events(
    region: Region,
    pattern: &[f64],
    cycles: usize,
    start: DateTime<Utc>,
    step: Duration,
) -> Vec<Event> {
    pattern
        .iter()
        .cycle()
        .take(pattern.len() * cycles)
        .enumerate()
        .map(|(i, magnitude)| Event::new(region, start + step * i as i32, *magnitude))
        .collect()
}
