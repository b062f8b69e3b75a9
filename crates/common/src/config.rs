//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clock::NANOS_PER_SEC;
use crate::error::{ShiftwatchError, ShiftwatchResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Trajectory analysis parameters.
    pub analysis: AnalysisConfig,

    /// Shift calendar settings.
    pub shift: ShiftConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Parameters of the trajectory analysis core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Keep every k-th pose before differencing. Trades noise for resolution.
    pub subsampling_stride: usize,

    /// Largest time step (ns) across which a position delta is trusted.
    pub max_gap_ns: i64,

    /// Per-step displacement (m) below which a sample counts as stationary.
    pub static_threshold: f64,

    /// Motion events closer than this (ns) belong to the same activity run.
    pub min_activity_gap_ns: i64,

    /// Displacement (m) below which the heading is reported as the zero vector.
    pub heading_epsilon: f64,

    /// Only analyze poses in this reference frame category, e.g. "FiducialWorld".
    pub frame_category: Option<String>,

    /// Stops at least this long (ns) are classified as long stops.
    pub long_stop_ns: i64,

    /// Include the per-sample velocity trajectory in reports.
    pub record_trajectory: bool,
}

/// Shift calendar settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    /// Fixed offset of the site's local time from UTC, in minutes.
    /// `None` uses the host time zone.
    pub utc_offset_minutes: Option<i32>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "shiftwatch=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            subsampling_stride: 15,
            max_gap_ns: 2 * NANOS_PER_SEC,
            static_threshold: 0.05,
            min_activity_gap_ns: 600 * NANOS_PER_SEC,
            heading_epsilon: 0.01,
            frame_category: None,
            long_stop_ns: 60 * NANOS_PER_SEC,
            record_trajectory: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AnalysisConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> ShiftwatchResult<()> {
        if self.subsampling_stride == 0 {
            return Err(ShiftwatchError::config("subsampling_stride must be >= 1"));
        }
        if self.max_gap_ns <= 0 {
            return Err(ShiftwatchError::config("max_gap_ns must be positive"));
        }
        if self.min_activity_gap_ns < 0 {
            return Err(ShiftwatchError::config(
                "min_activity_gap_ns must not be negative",
            ));
        }
        if !self.static_threshold.is_finite() || self.static_threshold < 0.0 {
            return Err(ShiftwatchError::config(
                "static_threshold must be a finite, non-negative number",
            ));
        }
        if !self.heading_epsilon.is_finite() || self.heading_epsilon < 0.0 {
            return Err(ShiftwatchError::config(
                "heading_epsilon must be a finite, non-negative number",
            ));
        }
        if self.long_stop_ns < 0 {
            return Err(ShiftwatchError::config("long_stop_ns must not be negative"));
        }
        Ok(())
    }
}

impl ShiftConfig {
    /// The configured offset as a chrono zone, if one is set and in range.
    pub fn fixed_offset(&self) -> ShiftwatchResult<Option<chrono::FixedOffset>> {
        match self.utc_offset_minutes {
            None => Ok(None),
            Some(minutes) => chrono::FixedOffset::east_opt(minutes * 60)
                .map(Some)
                .ok_or_else(|| {
                    ShiftwatchError::config(format!("UTC offset out of range: {minutes} min"))
                }),
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Missing or invalid files are errors.
    pub fn load_from(path: &Path) -> ShiftwatchResult<Self> {
        if !path.exists() {
            return Err(ShiftwatchError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.analysis.validate()?;
        Ok(config)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("shiftwatch").join("config.json")
}
