//! # Velocity Sampler
//!
//! Smoothed instantaneous velocity from a stream of timestamped positions,
//! such as touch or pointer movements.
//!
//! ## Overview
//!
//! A [`VelocitySampler`] keeps a bounded rolling window of recent samples
//! and reports the mean of the per-step velocities across that window. It
//! never fails: samples that go backwards in time are dropped, duplicate
//! timestamps are skipped, and too few samples yield a zero velocity.
//!
//! ## Quick Start
//!
//! ```
//! use velocity_sampler::{VelocitySampler, Vector3};
//!
//! let mut sampler = VelocitySampler::new();
//!
//! // While the user's moving a touch around, update the sampler
//! sampler.add_sample_at(Vector3::new(0.0, 0.0, 0.0), 0.0);
//! sampler.add_sample_at(Vector3::new(1.0, 1.0, 1.0), 1.0);
//! sampler.add_sample_at(Vector3::new(2.0, 2.0, 2.0), 5.0);
//!
//! // Extract the velocity
//! assert!(sampler.has_velocity());
//! assert_eq!(sampler.velocity_3d(), Vector3::new(0.625, 0.625, 0.625));
//! ```
//!
//! ## Architecture
//!
//! - [`geometry`]: 2D/3D vector value types
//! - [`time`]: clock sources used to stamp untimed samples
//! - [`sampler`]: the bounded sample window and the velocity sampler
//! - [`replay`]: JSON-lines trace format and offline replay
//! - [`app`]: CLI and configuration management

pub mod geometry;
pub mod time;
pub mod sampler;
pub mod replay;
pub mod app;

// Re-export commonly used types
pub use geometry::{Vector2, Vector3};
pub use sampler::{Ingest, PlanarMapping, Sample, SampleWindow, VelocitySampler};
pub use time::{Clock, ManualClock, MonotonicClock};

/// Result type alias for the velocity sampler
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the velocity sampler
///
/// Sampling itself is infallible; these cover configuration and trace I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Trace error on line {line}: {message}")]
    Trace { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
