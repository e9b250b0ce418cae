//! Trace File Format
//!
//! Recorded pointer traces are JSON lines, one sample per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! {"t": 0.000, "x": 1.0, "y": 2.0}
//! {"t": 0.016, "x": 1.5, "y": 2.5, "z": 0.25}
//! ```
//!
//! `t` (seconds) is optional; untimed samples are stamped by the replay
//! clock. `z` is optional; records without it are planar and go through the
//! sampler's planar mapping.

use crate::geometry::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

/// One recorded sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Timestamp in seconds
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl TraceRecord {
    /// A planar record
    pub fn planar(x: f64, y: f64, timestamp: Option<f64>) -> Self {
        Self { timestamp, x, y, z: None }
    }

    /// A 3D record
    pub fn spatial(position: Vector3, timestamp: Option<f64>) -> Self {
        Self {
            timestamp,
            x: position.x,
            y: position.y,
            z: Some(position.z),
        }
    }

    pub fn is_planar(&self) -> bool {
        self.z.is_none()
    }

    /// The x/y part of the record
    pub fn point(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// An in-memory trace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub records: Vec<TraceRecord>,
}

impl Trace {
    pub fn new(records: Vec<TraceRecord>) -> Self {
        Self { records }
    }

    /// Parse JSON lines from `reader`.
    ///
    /// Errors carry the 1-based line number of the offending line.
    pub fn parse<R: BufRead>(reader: R) -> crate::Result<Self> {
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let record: TraceRecord =
                serde_json::from_str(trimmed).map_err(|e| crate::Error::Trace {
                    line: index + 1,
                    message: e.to_string(),
                })?;
            records.push(record);
        }

        Ok(Self { records })
    }

    /// Load a trace file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let file = std::fs::File::open(path)?;
        let trace = Self::parse(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), records = trace.len(), "Loaded trace");
        Ok(trace)
    }

    /// Write the trace as JSON lines.
    pub fn write<W: Write>(&self, mut writer: W) -> crate::Result<()> {
        for record in &self.records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Save the trace to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.write(std::io::BufWriter::new(file))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromStr for Trace {
    type Err = crate::Error;

    fn from_str(content: &str) -> crate::Result<Self> {
        Self::parse(content.as_bytes())
    }
}
