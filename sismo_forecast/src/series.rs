//! Timestamped value series

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single observation: a value at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the value was observed
    pub timestamp: DateTime<Utc>,
    /// Observed value
    pub value: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Series of samples kept in insertion order.
///
/// Reading never reorders the stored samples: [`first`](EventSeries::first)
/// and [`last`](EventSeries::last) scan for the time bounds, and
/// [`sorted`](EventSeries::sorted) returns a time-ordered copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSeries {
    samples: Vec<Sample>,
}

impl EventSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample; no ordering is enforced
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Earliest sample by timestamp; the first inserted wins ties
    pub fn first(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .reduce(|best, sample| if sample.timestamp < best.timestamp { sample } else { best })
    }

    /// Latest sample by timestamp; the last inserted wins ties
    pub fn last(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .reduce(|best, sample| if sample.timestamp >= best.timestamp { sample } else { best })
    }

    /// Sample at `index` in insertion order
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Iterate in insertion order; each call starts from the beginning
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Copy of this series ordered by timestamp, equal timestamps keeping
    /// their insertion order
    pub fn sorted(&self) -> EventSeries {
        let mut samples = self.samples.clone();
        samples.sort_by_key(|sample| sample.timestamp);
        EventSeries { samples }
    }

    /// Values in insertion order
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.value).collect()
    }

    /// Timestamps in insertion order
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.samples.iter().map(|sample| sample.timestamp).collect()
    }

    /// Samples as a slice in insertion order
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Mean time between consecutive samples once sorted, zero for fewer
    /// than two samples
    pub fn mean_gap(&self) -> Duration {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) if self.len() > 1 => {
                (last.timestamp - first.timestamp) / (self.len() as i32 - 1)
            }
            _ => Duration::zero(),
        }
    }
}

impl FromIterator<Sample> for EventSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Sample> for EventSeries {
    fn extend<I: IntoIterator<Item = Sample>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

impl<'a> IntoIterator for &'a EventSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
