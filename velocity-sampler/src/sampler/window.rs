//! Bounded Sample Window
//!
//! A fixed-capacity, time-ordered sliding window of samples. The window
//! enforces the two structural rules the velocity estimate relies on:
//! - Timestamps never decrease (samples going backwards are dropped)
//! - Length never exceeds capacity (oldest sample evicted on overflow)
//!
//! Storage is a `VecDeque` allocated up front with room for one extra slot,
//! so the append-then-evict sequence never reallocates on the hot path.

use crate::geometry::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

/// Default number of samples kept in the window
pub const DEFAULT_CAPACITY: usize = 10;

/// Upper bound on the up-front allocation; larger windows grow on demand
const MAX_PREALLOCATED: usize = 4096;

/// One `(position, timestamp)` observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Position at `timestamp`
    pub position: Vector3,
    /// Seconds, on whatever epoch the caller's clock uses
    pub timestamp: f64,
}

impl Sample {
    pub const fn new(position: Vector3, timestamp: f64) -> Self {
        Self { position, timestamp }
    }
}

/// Outcome of offering a sample to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// Appended, window was below capacity
    Accepted,
    /// Appended, and the oldest sample was evicted to make room
    Evicted,
    /// Discarded because its timestamp precedes the newest sample
    Dropped,
}

impl Ingest {
    /// Whether the sample ended up in the window.
    pub fn is_stored(&self) -> bool {
        !matches!(self, Ingest::Dropped)
    }
}

/// Fixed-capacity, time-ordered sliding window
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SampleWindow {
    /// Create a window holding at most `capacity` samples.
    ///
    /// A capacity of 0 keeps nothing: every accepted sample is evicted
    /// immediately.
    pub fn with_capacity(capacity: usize) -> Self {
        let reserve = capacity.saturating_add(1).min(MAX_PREALLOCATED);
        Self {
            samples: VecDeque::with_capacity(reserve),
            capacity,
        }
    }

    /// Offer a sample.
    ///
    /// Samples older than the newest one are discarded without touching the
    /// window. Equal timestamps are accepted.
    pub fn push(&mut self, sample: Sample) -> Ingest {
        if let Some(newest) = self.samples.back() {
            if sample.timestamp < newest.timestamp {
                trace!(
                    timestamp = sample.timestamp,
                    newest = newest.timestamp,
                    "Dropping sample going backwards"
                );
                return Ingest::Dropped;
            }
        }

        self.samples.push_back(sample);

        if self.samples.len() > self.capacity {
            // Keep the window bounded
            self.samples.pop_front();
            trace!(capacity = self.capacity, "Evicted oldest sample");
            Ingest::Evicted
        } else {
            Ingest::Accepted
        }
    }

    /// Remove all samples, keeping the allocation.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Maximum number of samples retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the window holds `capacity` samples
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Oldest retained sample
    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    /// Most recent sample
    pub fn newest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Samples oldest-first
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Sample> + DoubleEndedIterator + '_ {
        self.samples.iter()
    }

    /// Time covered by the window, newest minus oldest timestamp
    pub fn span(&self) -> f64 {
        match (self.samples.front(), self.samples.back()) {
            (Some(oldest), Some(newest)) => newest.timestamp - oldest.timestamp,
            _ => 0.0,
        }
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a SampleWindow {
    type Item = &'a Sample;
    type IntoIter = std::collections::vec_deque::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
