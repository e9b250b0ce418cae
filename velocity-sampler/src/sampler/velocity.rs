//! Rolling Velocity Sampler
//!
//! Estimates velocity (units per second) from a stream of positions as the
//! mean of the finite-difference velocities between consecutive samples in
//! a bounded window. Supports 2D and 3D tracking.
//!
//! ```
//! use velocity_sampler::{ManualClock, VelocitySampler, Vector2};
//!
//! let clock = ManualClock::new(0.0);
//! let mut sampler = VelocitySampler::with_clock(clock.clone());
//!
//! // While the pointer moves, feed its location
//! sampler.add_point(Vector2::new(0.0, 0.0));
//! clock.advance(0.5);
//! sampler.add_point(Vector2::new(10.0, 5.0));
//!
//! assert!(sampler.has_velocity());
//! assert_eq!(sampler.velocity(), Vector2::new(20.0, 10.0));
//! ```

use super::window::{Ingest, Sample, SampleWindow, DEFAULT_CAPACITY};
use crate::geometry::{Vector2, Vector3};
use crate::time::{Clock, MonotonicClock};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a planar point is lifted into a 3D sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanarMapping {
    /// `(x, y)` becomes `(x, y, 0)`
    #[default]
    Preserve,
    /// `(x, y)` becomes `(y, y, 0)`.
    ///
    /// Reproduces the behavior of earlier releases of this sampler's
    /// planar entry point, which copied `y` into the x slot. Only useful
    /// when matching recorded output from those releases.
    DuplicateY,
}

impl PlanarMapping {
    /// Lift `point` into 3D.
    #[inline]
    pub fn lift(&self, point: Vector2) -> Vector3 {
        match self {
            PlanarMapping::Preserve => point.extend(0.0),
            PlanarMapping::DuplicateY => Vector3::new(point.y, point.y, 0.0),
        }
    }
}

/// Rolling-window velocity sampler
///
/// Owns its samples; mutate through `&mut self` only. Use one sampler per
/// tracked pointer or touch and call [`reset`](Self::reset) when the
/// gesture ends.
#[derive(Debug, Clone)]
pub struct VelocitySampler<C = MonotonicClock> {
    window: SampleWindow,
    /// First position since the last reset, kept even after eviction
    start_position: Option<Vector3>,
    planar_mapping: PlanarMapping,
    clock: C,
}

impl VelocitySampler<MonotonicClock> {
    /// Create a sampler averaging over the last 10 samples.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a sampler averaging over the last `capacity` samples.
    ///
    /// Capacities below 2 are accepted but never yield a velocity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_clock(capacity, MonotonicClock)
    }
}

impl Default for VelocitySampler<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> VelocitySampler<C> {
    /// Create a sampler with the default capacity that stamps untimed
    /// samples with `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self::with_capacity_and_clock(DEFAULT_CAPACITY, clock)
    }

    pub fn with_capacity_and_clock(capacity: usize, clock: C) -> Self {
        debug!(capacity, "Created velocity sampler");
        Self {
            window: SampleWindow::with_capacity(capacity),
            start_position: None,
            planar_mapping: PlanarMapping::default(),
            clock,
        }
    }

    /// Add a sample stamped with the current clock reading.
    pub fn add_sample(&mut self, position: Vector3) -> Ingest {
        let timestamp = self.clock.now();
        self.add_sample_at(position, timestamp)
    }

    /// Add a sample at `timestamp` seconds.
    ///
    /// Timestamps must not decrease: a sample earlier than the newest one
    /// is dropped and the sampler is left untouched.
    pub fn add_sample_at(&mut self, position: Vector3, timestamp: f64) -> Ingest {
        // An empty sampler never drops, so the first sample is always the start.
        if self.start_position.is_none() {
            self.start_position = Some(position);
        }

        self.window.push(Sample::new(position, timestamp))
    }

    /// Add a planar sample stamped with the current clock reading.
    pub fn add_point(&mut self, point: Vector2) -> Ingest {
        let timestamp = self.clock.now();
        self.add_point_at(point, timestamp)
    }

    /// Add a planar sample at `timestamp` seconds, lifted to 3D through the
    /// configured [`PlanarMapping`].
    pub fn add_point_at(&mut self, point: Vector2, timestamp: f64) -> Ingest {
        let position = self.planar_mapping.lift(point);
        self.add_sample_at(position, timestamp)
    }
}

impl<C> VelocitySampler<C> {
    /// Use `mapping` for the planar entry points.
    pub fn with_planar_mapping(mut self, mapping: PlanarMapping) -> Self {
        self.planar_mapping = mapping;
        self
    }

    pub fn planar_mapping(&self) -> PlanarMapping {
        self.planar_mapping
    }

    /// Whether the sampler has a valid velocity right now. If this is
    /// `false`, both velocities are zero.
    pub fn has_velocity(&self) -> bool {
        self.window.len() >= 2
    }

    /// Mean velocity over the window, in units per second.
    ///
    /// Each consecutive pair of samples contributes `Δposition / Δt`, and
    /// the contributions are averaged with equal weight. Pairs with
    /// `Δt == 0` are skipped and the earlier sample stays the reference
    /// for the next pair. Zero when fewer than two samples are held or
    /// every pair was skipped.
    pub fn velocity_3d(&self) -> Vector3 {
        if !self.has_velocity() {
            return Vector3::ZERO;
        }

        let mut samples = self.window.iter();
        let Some(mut previous) = samples.next() else {
            return Vector3::ZERO;
        };

        let mut total = Vector3::ZERO;
        let mut steps = 0usize;
        for sample in samples {
            let dt = sample.timestamp - previous.timestamp;
            if dt == 0.0 {
                continue;
            }
            total += (sample.position - previous.position) / dt;
            steps += 1;
            previous = sample;
        }

        if steps == 0 {
            return Vector3::ZERO;
        }
        total / steps as f64
    }

    /// Mean velocity projected onto the x/y plane.
    pub fn velocity(&self) -> Vector2 {
        self.velocity_3d().xy()
    }

    /// The 3D position the sampler began tracking at.
    pub fn start_position_3d(&self) -> Option<Vector3> {
        self.start_position
    }

    /// The position the sampler began tracking at.
    pub fn start_position(&self) -> Option<Vector2> {
        self.start_position.map(|p| p.xy())
    }

    /// The 3D position of the latest sample.
    pub fn position_3d(&self) -> Option<Vector3> {
        self.window.newest().map(|s| s.position)
    }

    /// The position of the latest sample.
    pub fn position(&self) -> Option<Vector2> {
        self.window.newest().map(|s| s.position.xy())
    }

    /// Timestamp of the latest sample.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.window.newest().map(|s| s.timestamp)
    }

    /// Forget all samples and the start position so the sampler can track
    /// a new gesture. The window allocation is kept.
    pub fn reset(&mut self) {
        debug!(discarded = self.window.len(), "Resetting velocity sampler");
        self.start_position = None;
        self.window.clear();
    }

    /// Maximum number of samples averaged over
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Read-only view of the retained samples
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn test_empty() {
        let sampler = VelocitySampler::new();
        assert!(!sampler.has_velocity());
        assert_eq!(sampler.velocity(), Vector2::ZERO);
        assert_eq!(sampler.velocity_3d(), Vector3::ZERO);
        assert!(sampler.position().is_none());
        assert!(sampler.position_3d().is_none());
        assert!(sampler.start_position().is_none());
        assert!(sampler.start_position_3d().is_none());
        assert_eq!(sampler.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_only_one_sample() {
        let mut sampler = VelocitySampler::with_clock(ManualClock::new(0.0));
        sampler.add_sample(v(1.0, 2.0, 3.0));

        assert!(!sampler.has_velocity());
        assert_eq!(sampler.velocity(), Vector2::ZERO);
        assert_eq!(sampler.velocity_3d(), Vector3::ZERO);
        assert_eq!(sampler.start_position_3d(), Some(v(1.0, 2.0, 3.0)));
        assert_eq!(sampler.position_3d(), Some(v(1.0, 2.0, 3.0)));
        assert_eq!(sampler.start_position(), Some(Vector2::new(1.0, 2.0)));
        assert_eq!(sampler.position(), Some(Vector2::new(1.0, 2.0)));
    }

    #[test]
    fn test_valid_samples() {
        let mut sampler = VelocitySampler::new();
        sampler.add_sample_at(Vector3::ZERO, 0.0);

        // move 1 unit in 1 second
        sampler.add_sample_at(v(1.0, 1.0, 1.0), 1.0);

        assert!(sampler.has_velocity());
        assert_eq!(sampler.velocity(), Vector2::new(1.0, 1.0));
        assert_eq!(sampler.velocity_3d(), v(1.0, 1.0, 1.0));

        // move another 1 unit in 4 seconds
        sampler.add_sample_at(v(2.0, 2.0, 2.0), 5.0);

        assert_eq!(sampler.velocity_3d(), v(0.625, 0.625, 0.625));
    }

    #[test]
    fn test_mean_of_steps_not_endpoint_slope() {
        let mut sampler = VelocitySampler::new();
        sampler.add_sample_at(v(0.0, 0.0, 0.0), 0.0);
        sampler.add_sample_at(v(2.0, 0.0, 0.0), 1.0);
        sampler.add_sample_at(v(3.0, 0.0, 0.0), 3.0);

        // Steps: 2/1 and 1/2, mean 1.25. Endpoint slope would be 1.0.
        assert_eq!(sampler.velocity_3d(), v(1.25, 0.0, 0.0));
    }

    #[test]
    fn test_out_of_order_sample_dropped() {
        let mut sampler = VelocitySampler::new();
        sampler.add_sample_at(v(0.0, 0.0, 0.0), 4.0);
        sampler.add_sample_at(v(1.0, 0.0, 0.0), 5.0);
        let before = sampler.velocity_3d();

        assert_eq!(sampler.add_sample_at(v(9.0, 9.0, 9.0), 2.0), Ingest::Dropped);
        assert_eq!(sampler.len(), 2);
        assert_eq!(sampler.position_3d(), Some(v(1.0, 0.0, 0.0)));
        assert_eq!(sampler.velocity_3d(), before);
        assert_eq!(sampler.start_position_3d(), Some(v(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_zero_dt_pair_skipped_against_first_sample() {
        let mut sampler = VelocitySampler::new();
        sampler.add_sample_at(v(0.0, 0.0, 0.0), 0.0);
        sampler.add_sample_at(v(5.0, 5.0, 5.0), 0.0);
        sampler.add_sample_at(v(1.0, 2.0, 3.0), 1.0);

        assert!(sampler.has_velocity());
        // Only (t=0 first) -> (t=1) contributes
        assert_eq!(sampler.velocity_3d(), v(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_all_zero_dt_yields_zero() {
        let mut sampler = VelocitySampler::new();
        sampler.add_sample_at(v(0.0, 0.0, 0.0), 2.0);
        sampler.add_sample_at(v(1.0, 1.0, 1.0), 2.0);
        sampler.add_sample_at(v(2.0, 2.0, 2.0), 2.0);

        assert!(sampler.has_velocity());
        assert_eq!(sampler.velocity_3d(), Vector3::ZERO);
        assert!(sampler.velocity_3d().is_finite());
    }

    #[test]
    fn test_eviction_keeps_start_position() {
        let mut sampler = VelocitySampler::with_capacity(3);
        for i in 0..7 {
            let x = i as f64;
            sampler.add_sample_at(v(x, 0.0, 0.0), x);
        }

        assert_eq!(sampler.len(), 3);
        let xs: Vec<f64> = sampler.window().iter().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![4.0, 5.0, 6.0]);
        assert_eq!(sampler.start_position_3d(), Some(Vector3::ZERO));
    }

    #[test]
    fn test_eviction_changes_velocity() {
        let mut sampler = VelocitySampler::with_capacity(2);
        sampler.add_sample_at(v(0.0, 0.0, 0.0), 0.0);
        sampler.add_sample_at(v(10.0, 0.0, 0.0), 1.0);
        assert_eq!(sampler.velocity_3d(), v(10.0, 0.0, 0.0));

        sampler.add_sample_at(v(11.0, 0.0, 0.0), 2.0);
        assert_eq!(sampler.velocity_3d(), v(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_reset() {
        let mut sampler = VelocitySampler::with_capacity(4);
        sampler.add_sample_at(v(1.0, 1.0, 1.0), 10.0);
        sampler.add_sample_at(v(2.0, 2.0, 2.0), 11.0);

        sampler.reset();
        assert!(!sampler.has_velocity());
        assert!(sampler.is_empty());
        assert_eq!(sampler.velocity_3d(), Vector3::ZERO);
        assert!(sampler.position().is_none());
        assert!(sampler.start_position().is_none());
        assert_eq!(sampler.capacity(), 4);

        // Earlier timestamps are fine after a reset
        assert_eq!(sampler.add_sample_at(v(3.0, 3.0, 3.0), 0.0), Ingest::Accepted);
        assert_eq!(sampler.start_position_3d(), Some(v(3.0, 3.0, 3.0)));

        sampler.reset();
        assert!(sampler.start_position_3d().is_none());
    }

    #[test]
    fn test_clock_stamps_untimed_samples() {
        let clock = ManualClock::new(100.0);
        let mut sampler = VelocitySampler::with_clock(clock.clone());

        sampler.add_sample(v(0.0, 0.0, 0.0));
        clock.advance(2.0);
        sampler.add_sample(v(4.0, -2.0, 1.0));

        assert_eq!(sampler.last_timestamp(), Some(102.0));
        assert_eq!(sampler.velocity_3d(), v(2.0, -1.0, 0.5));
    }

    #[test]
    fn test_clock_going_backwards_drops_sample() {
        let clock = ManualClock::new(5.0);
        let mut sampler = VelocitySampler::with_clock(clock.clone());

        sampler.add_sample(v(0.0, 0.0, 0.0));
        clock.set(4.0);
        assert_eq!(sampler.add_sample(v(1.0, 0.0, 0.0)), Ingest::Dropped);
        assert_eq!(sampler.len(), 1);
    }

    #[test]
    fn test_closure_clock() {
        let mut sampler = VelocitySampler::with_capacity_and_clock(5, || 7.5);
        sampler.add_sample(Vector3::ZERO);
        assert_eq!(sampler.last_timestamp(), Some(7.5));
    }

    #[test]
    fn test_planar_preserve_mapping() {
        let mut sampler = VelocitySampler::new();
        assert_eq!(sampler.planar_mapping(), PlanarMapping::Preserve);

        sampler.add_point_at(Vector2::new(0.0, 0.0), 0.0);
        sampler.add_point_at(Vector2::new(3.0, 4.0), 1.0);

        assert_eq!(sampler.position_3d(), Some(v(3.0, 4.0, 0.0)));
        assert_eq!(sampler.velocity(), Vector2::new(3.0, 4.0));
        assert_eq!(sampler.velocity_3d().z, 0.0);
    }

    #[test]
    fn test_planar_duplicate_y_mapping() {
        let mut sampler = VelocitySampler::new().with_planar_mapping(PlanarMapping::DuplicateY);

        sampler.add_point_at(Vector2::new(0.0, 0.0), 0.0);
        sampler.add_point_at(Vector2::new(3.0, 4.0), 1.0);

        assert_eq!(sampler.position_3d(), Some(v(4.0, 4.0, 0.0)));
        assert_eq!(sampler.start_position(), Some(Vector2::new(0.0, 0.0)));
        assert_eq!(sampler.velocity(), Vector2::new(4.0, 4.0));
    }

    #[test]
    fn test_planar_mapping_lift() {
        let p = Vector2::new(1.0, 2.0);
        assert_eq!(PlanarMapping::Preserve.lift(p), v(1.0, 2.0, 0.0));
        assert_eq!(PlanarMapping::DuplicateY.lift(p), v(2.0, 2.0, 0.0));
    }

    #[test]
    fn test_zero_capacity_never_has_velocity() {
        let mut sampler = VelocitySampler::with_capacity(0);
        sampler.add_sample_at(v(1.0, 0.0, 0.0), 0.0);
        sampler.add_sample_at(v(2.0, 0.0, 0.0), 1.0);

        assert!(!sampler.has_velocity());
        assert_eq!(sampler.velocity_3d(), Vector3::ZERO);
        assert!(sampler.position().is_none());
        assert_eq!(sampler.start_position_3d(), Some(v(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_capacity_one_never_has_velocity() {
        let mut sampler = VelocitySampler::with_capacity(1);
        sampler.add_sample_at(v(1.0, 0.0, 0.0), 0.0);
        sampler.add_sample_at(v(2.0, 0.0, 0.0), 1.0);

        assert!(!sampler.has_velocity());
        assert_eq!(sampler.velocity_3d(), Vector3::ZERO);
        assert_eq!(sampler.position_3d(), Some(v(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut sampler = VelocitySampler::new();
        sampler.add_sample_at(v(0.0, 0.0, 0.0), 0.0);

        let mut copy = sampler.clone();
        copy.add_sample_at(v(1.0, 0.0, 0.0), 1.0);

        assert_eq!(sampler.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_planar_mapping_serialization() {
        assert_eq!(serde_json::to_string(&PlanarMapping::Preserve).unwrap(), "\"preserve\"");
        assert_eq!(
            serde_json::to_string(&PlanarMapping::DuplicateY).unwrap(),
            "\"duplicate_y\""
        );
    }
}
