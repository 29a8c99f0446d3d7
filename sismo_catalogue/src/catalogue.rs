//! In-memory event catalogue with query helpers

use crate::event::Event;
use crate::region::Region;
use chrono::Datelike;
use std::collections::HashSet;

/// A deduplicated collection of seismic events.
///
/// Events keep the order they were first inserted in; re-inserting an
/// event equal to one already present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    events: Vec<Event>,
    seen: HashSet<Event>,
}

impl Catalogue {
    /// Create an empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event, returning `false` when it was already present
    pub fn insert(&mut self, event: Event) -> bool {
        if !self.seen.insert(event.clone()) {
            return false;
        }
        self.events.push(event);
        true
    }

    /// Number of distinct events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalogue holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Events located in any of the given regions
    pub fn by_region(&self, regions: &[Region]) -> Vec<&Event> {
        self.filter(|event| regions.contains(&event.region))
    }

    /// Events that happened in the given calendar month (1-12) of any year
    pub fn by_month(&self, month: u32) -> Vec<&Event> {
        self.filter(|event| event.timestamp.month() == month)
    }

    /// Events with magnitude strictly above `limit`
    pub fn by_magnitude_above(&self, limit: f64) -> Vec<&Event> {
        self.filter(|event| event.magnitude > limit)
    }

    /// Events with magnitude strictly below `limit`
    pub fn by_magnitude_below(&self, limit: f64) -> Vec<&Event> {
        self.filter(|event| event.magnitude < limit)
    }

    /// Events with magnitude in `low..=high`
    pub fn by_magnitude_between(&self, low: f64, high: f64) -> Vec<&Event> {
        self.filter(|event| event.magnitude >= low && event.magnitude <= high)
    }

    /// Events in `region` with magnitude strictly above `limit`
    pub fn by_region_magnitude_above(&self, region: Region, limit: f64) -> Vec<&Event> {
        self.filter(|event| event.region == region && event.magnitude > limit)
    }

    /// Events in `region` with magnitude strictly below `limit`
    pub fn by_region_magnitude_below(&self, region: Region, limit: f64) -> Vec<&Event> {
        self.filter(|event| event.region == region && event.magnitude < limit)
    }

    /// Events in `region` with magnitude in `low..=high`
    pub fn by_region_magnitude_between(&self, region: Region, low: f64, high: f64) -> Vec<&Event> {
        self.filter(|event| {
            event.region == region && event.magnitude >= low && event.magnitude <= high
        })
    }

    /// Event with the highest magnitude
    pub fn strongest(&self) -> Option<&Event> {
        self.events
            .iter()
            .reduce(|best, event| if event.magnitude > best.magnitude { event } else { best })
    }

    /// Most recent event
    pub fn latest(&self) -> Option<&Event> {
        self.events.iter().max_by_key(|event| event.timestamp)
    }

    /// Earliest event
    pub fn oldest(&self) -> Option<&Event> {
        self.events.iter().min_by_key(|event| event.timestamp)
    }

    /// Year of the earliest event
    pub fn first_year(&self) -> Option<i32> {
        self.oldest().map(|event| event.timestamp.year())
    }

    /// Year of the most recent event
    pub fn last_year(&self) -> Option<i32> {
        self.latest().map(|event| event.timestamp.year())
    }

    fn filter<F>(&self, predicate: F) -> Vec<&Event>
    where
        F: Fn(&Event) -> bool,
    {
        self.events.iter().filter(|event| predicate(event)).collect()
    }
}

impl Extend<Event> for Catalogue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        for event in iter {
            self.insert(event);
        }
    }
}

impl FromIterator<Event> for Catalogue {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut catalogue = Catalogue::new();
        catalogue.extend(iter);
        catalogue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(region: Region, year: i32, month: u32, day: u32, magnitude: f64) -> Event {
        Event::new(
            region,
            Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
            magnitude,
        )
    }

    fn sample_catalogue() -> Catalogue {
        vec![
            event(Region::Maule, 2010, 2, 27, 8.8),
            event(Region::Maule, 2012, 3, 25, 7.1),
            event(Region::Biobio, 2011, 2, 11, 6.8),
            event(Region::Coquimbo, 2015, 9, 16, 8.3),
            event(Region::Coquimbo, 2015, 9, 17, 3.5),
            event(Region::Tarapaca, 2014, 4, 1, 3.4),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut catalogue = sample_catalogue();
        assert_eq!(catalogue.len(), 6);
        assert!(!catalogue.insert(event(Region::Maule, 2010, 2, 27, 8.8)));
        assert!(catalogue.insert(event(Region::Maule, 2010, 2, 27, 8.9)));
        assert_eq!(catalogue.len(), 7);
    }

    #[test]
    fn test_by_region() {
        let catalogue = sample_catalogue();
        assert_eq!(catalogue.by_region(&[Region::Maule]).len(), 2);
        assert_eq!(catalogue.by_region(&[Region::Maule, Region::Biobio]).len(), 3);
        assert!(catalogue.by_region(&[Region::Aysen]).is_empty());
    }

    #[test]
    fn test_by_month() {
        let catalogue = sample_catalogue();
        assert_eq!(catalogue.by_month(2).len(), 2);
        assert_eq!(catalogue.by_month(9).len(), 2);
        assert!(catalogue.by_month(12).is_empty());
    }

    #[test]
    fn test_magnitude_filters() {
        let catalogue = sample_catalogue();
        assert_eq!(catalogue.by_magnitude_above(8.3).len(), 1);
        assert_eq!(catalogue.by_magnitude_below(3.5).len(), 1);
        assert_eq!(catalogue.by_magnitude_between(3.5, 7.1).len(), 3);
        assert_eq!(catalogue.by_region_magnitude_above(Region::Coquimbo, 5.0).len(), 1);
        assert_eq!(catalogue.by_region_magnitude_below(Region::Coquimbo, 5.0).len(), 1);
        assert_eq!(
            catalogue
                .by_region_magnitude_between(Region::Maule, 7.1, 8.8)
                .len(),
            2
        );
    }

    #[test]
    fn test_extremes() {
        let catalogue = sample_catalogue();
        assert_eq!(catalogue.strongest().unwrap().magnitude, 8.8);
        assert_eq!(catalogue.latest().unwrap().magnitude, 3.5);
        assert_eq!(catalogue.oldest().unwrap().magnitude, 8.8);
        assert_eq!(catalogue.first_year(), Some(2010));
        assert_eq!(catalogue.last_year(), Some(2015));
    }

    #[test]
    fn test_empty_catalogue() {
        let catalogue = Catalogue::new();
        assert!(catalogue.is_empty());
        assert!(catalogue.strongest().is_none());
        assert_eq!(catalogue.first_year(), None);
    }
}
