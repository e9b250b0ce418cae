//! Clock sources for sample timestamps
//!
//! Timestamps are `f64` seconds. Only ordering and differences matter, so
//! the epoch is whatever the clock chooses:
//! - [`MonotonicClock`]: seconds since a process-wide anchor, never goes backward
//! - [`ManualClock`]: driven explicitly, for deterministic tests and replays

pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};
