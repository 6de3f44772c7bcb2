//! Configuration for detection runs and the real-time monitor

use logbert_core::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Lowest and highest threshold the user may pick
pub const THRESHOLD_RANGE: (f64, f64) = (0.1, 0.9);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("threshold {0} is outside the allowed range 0.1..=0.9")]
    ThresholdOutOfRange(f64),

    #[error("probability {0} is outside 0.0..=1.0")]
    ProbabilityOutOfRange(f64),

    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,
}

// Main config structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub detection: DetectionConfig,
    pub monitor: MonitorConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detection.validate()?;
        self.monitor.validate()
    }
}

/// Per-run settings supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    // scores strictly above this are anomalies
    pub threshold: f64,

    pub level_filter: LevelFilter,

    // display-only: scoring ignores it
    pub rca_enabled: bool,

    // match keyword signals against the lower-cased line
    pub case_insensitive: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            level_filter: LevelFilter::All,
            rca_enabled: true,
            case_insensitive: false,
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = THRESHOLD_RANGE;
        if !(min..=max).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }
}

// Real-time monitor cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // period of the synthetic feed timer
    pub tick_interval_ms: u64,

    // chance that a tick triggers a lightweight re-analysis
    pub reanalyze_probability: f64,

    // simulated processing time of a full analysis
    pub analysis_latency_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 3000,
            reanalyze_probability: 0.3,
            analysis_latency_ms: 2000,
        }
    }
}

impl MonitorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn analysis_latency(&self) -> Duration {
        Duration::from_millis(self.analysis_latency_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if !(0.0..=1.0).contains(&self.reanalyze_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.reanalyze_probability));
        }
        Ok(())
    }
}

// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
