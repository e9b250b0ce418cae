//! Velocity sampling
//!
//! - [`window`]: bounded, time-ordered sample storage
//! - [`velocity`]: the sampler that averages per-step velocities over the window

pub mod window;
pub mod velocity;

pub use window::{Ingest, Sample, SampleWindow, DEFAULT_CAPACITY};
pub use velocity::{PlanarMapping, VelocitySampler};
