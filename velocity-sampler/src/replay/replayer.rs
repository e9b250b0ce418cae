//! Trace Replay
//!
//! Feeds a recorded trace through a [`VelocitySampler`] and collects the
//! velocity estimate as it evolves.

use super::trace::{Trace, TraceRecord};
use crate::geometry::Vector3;
use crate::sampler::{Ingest, VelocitySampler};
use crate::time::Clock;
use serde::Serialize;
use tracing::{debug, info};

/// Velocity estimate after a stored sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayReport {
    /// 0-based index of the record in the trace
    pub index: usize,
    /// Timestamp the sample was stored with
    pub timestamp: f64,
    pub position: Vector3,
    pub velocity: Vector3,
    /// Magnitude of `velocity`
    pub speed: f64,
}

/// Outcome of a full replay
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaySummary {
    /// Records read from the trace
    pub records: usize,
    /// Records stored while the window had room
    pub accepted: usize,
    /// Records stored by evicting the oldest sample
    pub evicted: usize,
    /// Records dropped for going backwards in time
    pub dropped: usize,
    pub final_velocity: Vector3,
    pub start_position: Option<Vector3>,
    pub end_position: Option<Vector3>,
    pub reports: Vec<ReplayReport>,
}

impl ReplaySummary {
    /// Records that made it into the window
    pub fn stored(&self) -> usize {
        self.accepted + self.evicted
    }
}

/// Drives a sampler from trace records
pub struct Replayer<C> {
    sampler: VelocitySampler<C>,
    /// Emit a report every N stored samples
    report_every: usize,
}

impl<C: Clock> Replayer<C> {
    /// Create a replayer around `sampler`. A `report_every` of 0 is treated
    /// as 1.
    pub fn new(sampler: VelocitySampler<C>, report_every: usize) -> Self {
        Self {
            sampler,
            report_every: report_every.max(1),
        }
    }

    /// Feed one record to the sampler.
    pub fn feed(&mut self, record: &TraceRecord) -> Ingest {
        match (record.z, record.timestamp) {
            (Some(z), Some(t)) => self
                .sampler
                .add_sample_at(Vector3::new(record.x, record.y, z), t),
            (Some(z), None) => self.sampler.add_sample(Vector3::new(record.x, record.y, z)),
            (None, Some(t)) => self.sampler.add_point_at(record.point(), t),
            (None, None) => self.sampler.add_point(record.point()),
        }
    }

    /// Replay every record of `trace`, starting from an empty sampler.
    pub fn run(&mut self, trace: &Trace) -> ReplaySummary {
        self.sampler.reset();

        let mut summary = ReplaySummary {
            records: trace.len(),
            ..ReplaySummary::default()
        };

        for (index, record) in trace.records.iter().enumerate() {
            match self.feed(record) {
                Ingest::Accepted => summary.accepted += 1,
                Ingest::Evicted => summary.evicted += 1,
                Ingest::Dropped => {
                    summary.dropped += 1;
                    debug!(index, "Trace record went backwards in time, dropped");
                    continue;
                }
            }

            if summary.stored() % self.report_every == 0 {
                summary.reports.push(self.report(index));
            }
        }

        summary.final_velocity = self.sampler.velocity_3d();
        summary.start_position = self.sampler.start_position_3d();
        summary.end_position = self.sampler.position_3d();

        info!(
            records = summary.records,
            stored = summary.stored(),
            dropped = summary.dropped,
            "Replay finished"
        );

        summary
    }

    fn report(&self, index: usize) -> ReplayReport {
        let velocity = self.sampler.velocity_3d();
        ReplayReport {
            index,
            timestamp: self.sampler.last_timestamp().unwrap_or_default(),
            position: self.sampler.position_3d().unwrap_or_default(),
            velocity,
            speed: velocity.magnitude(),
        }
    }
}

impl<C> Replayer<C> {
    pub fn sampler(&self) -> &VelocitySampler<C> {
        &self.sampler
    }

    pub fn into_sampler(self) -> VelocitySampler<C> {
        self.sampler
    }
}
