//! Trace replay
//!
//! Reads recorded pointer traces and runs them through a sampler, which is
//! how estimates are inspected and tuned offline.

pub mod trace;
pub mod replayer;

pub use trace::{Trace, TraceRecord};
pub use replayer::{ReplayReport, ReplaySummary, Replayer};
