//! Configuration Management

use crate::sampler::{PlanarMapping, VelocitySampler, DEFAULT_CAPACITY};
use crate::time::Clock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest window accepted from configuration
pub const MAX_CAPACITY: usize = 4096;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Sampler settings
    pub sampler: SamplerConfig,
    /// Replay settings
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Sampler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of samples averaged over
    pub capacity: usize,
    /// How planar points are lifted into 3D
    #[serde(default)]
    pub planar_mapping: PlanarMapping,
}

/// Replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Report the estimate every N stored samples
    pub report_every: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            planar_mapping: PlanarMapping::default(),
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { report_every: 1 }
    }
}

impl SamplerConfig {
    /// Build a sampler with these settings.
    pub fn build<C: Clock>(&self, clock: C) -> VelocitySampler<C> {
        VelocitySampler::with_capacity_and_clock(self.capacity, clock)
            .with_planar_mapping(self.planar_mapping)
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.sampler.capacity < 2 || self.sampler.capacity > MAX_CAPACITY {
            return Err(crate::Error::Config(format!(
                "capacity must be in [2, {}], got {}",
                MAX_CAPACITY, self.sampler.capacity
            )));
        }
        if self.replay.report_every == 0 {
            return Err(crate::Error::Config("report_every must be > 0".to_string()));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".velocity_sampler").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
