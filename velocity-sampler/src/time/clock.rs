//! Monotonic Clock Sources
//!
//! The sampler asks a [`Clock`] for the current time whenever a sample is
//! added without an explicit timestamp. The default source is anchored to a
//! process-wide `Instant`, so readings are monotonic and start near zero.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Process-wide anchor, initialized once on first use
static CLOCK_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// A source of non-decreasing timestamps in seconds.
///
/// Any `Fn() -> f64` closure is a clock, which keeps ad-hoc substitution in
/// tests cheap:
///
/// ```
/// use velocity_sampler::time::Clock;
///
/// let fixed = || 42.0;
/// assert_eq!(fixed.now(), 42.0);
/// ```
pub trait Clock {
    /// Current time in seconds.
    fn now(&self) -> f64;
}

impl<F> Clock for F
where
    F: Fn() -> f64,
{
    #[inline]
    fn now(&self) -> f64 {
        self()
    }
}

/// Monotonic clock reporting seconds since the process anchor
///
/// All instances share one anchor, so timestamps taken by different
/// samplers are directly comparable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    /// Pin the process anchor. Call once at startup so that readings
    /// begin at (almost) zero; otherwise the first `now()` pins it.
    pub fn init() {
        CLOCK_ANCHOR.get_or_init(Instant::now);
    }

    /// Seconds elapsed since the anchor.
    #[inline]
    pub fn now_secs() -> f64 {
        CLOCK_ANCHOR.get_or_init(Instant::now).elapsed().as_secs_f64()
    }

    /// Check if two readings maintain monotonicity.
    /// Returns true if t2 >= t1.
    #[inline]
    pub fn is_monotonic(t1: f64, t2: f64) -> bool {
        t2 >= t1
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> f64 {
        Self::now_secs()
    }
}

/// Manually driven clock
///
/// Clones share the same reading, so a test can keep one handle and hand
/// another to the sampler:
///
/// ```
/// use velocity_sampler::time::{Clock, ManualClock};
///
/// let clock = ManualClock::new(1.0);
/// let handle = clock.clone();
/// handle.advance(0.5);
/// assert_eq!(clock.now(), 1.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    /// `f64` bits of the current reading
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading `start` seconds.
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    /// Set the current reading.
    ///
    /// Setting an earlier time is allowed; the sampler drops samples that
    /// would go backwards.
    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::Relaxed);
    }

    /// Move the reading forward by `secs` and return the new reading.
    pub fn advance(&self, secs: f64) -> f64 {
        let next = self.now() + secs;
        self.set(next);
        next
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
