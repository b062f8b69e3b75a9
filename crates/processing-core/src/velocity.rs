//! Velocity estimation from a recorded pose stream.
//!
//! # Algorithm
//!
//! 1. **Subsample** every k-th pose (stride `k`) to suppress tracker jitter.
//! 2. **Difference** each consecutive pair of retained poses: speed is the
//!    displacement magnitude `sqrt(dx² + dy²)` over one sampling step.
//! 3. **Validate** the pair: the time step must be below `max_gap_ns` and both
//!    poses must share a reference frame. Deltas across a relocalization or a
//!    dropout say nothing about motion.
//! 4. **Heading** is the unit displacement for valid pairs whose speed exceeds
//!    `heading_epsilon`, the zero vector otherwise.
//!
//! Each sample is stamped with the timestamp of the EARLIER pose of its pair.
//! The data mask marks, in the original stream, the LATER pose of every valid
//! pair; those are the poses the stop detector reads positions from.

use serde::{Deserialize, Serialize};
use shiftwatch_common::config::AnalysisConfig;
use shiftwatch_common::error::{ShiftwatchError, ShiftwatchResult};
use shiftwatch_trajectory_model::pose::{PoseSample, TimestampNs};
use shiftwatch_trajectory_model::velocity::{Heading, VelocitySample};

use crate::validation::validate_poses;

/// Configuration for the velocity estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityConfig {
    /// Keep every k-th pose. Must be at least 1.
    pub subsampling_stride: usize,

    /// Pairs whose time step reaches this value (ns) are invalid.
    pub max_gap_ns: i64,

    /// Speeds at or below this produce a zero heading.
    pub heading_epsilon: f64,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            subsampling_stride: 15,
            max_gap_ns: 2_000_000_000,
            heading_epsilon: 0.01,
        }
    }
}

impl From<&AnalysisConfig> for VelocityConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            subsampling_stride: config.subsampling_stride,
            max_gap_ns: config.max_gap_ns,
            heading_epsilon: config.heading_epsilon,
        }
    }
}

/// Validity-filtered velocity estimates plus the mask over the original stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityProfile {
    /// One sample per valid pair of retained poses, in time order.
    pub samples: Vec<VelocitySample>,

    /// Pairs dropped for spanning a frame change or an untrusted gap.
    pub rejected_pairs: usize,

    /// Same length as the input stream. True exactly at the poses that
    /// completed a valid pair, so its true count equals `samples.len()`.
    pub data_mask: Vec<bool>,
}

impl VelocityProfile {
    pub fn valid_count(&self) -> usize {
        self.samples.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected_pairs
    }

    /// Speeds aligned with the true entries of `data_mask`.
    pub fn speeds(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.speed).collect()
    }

    /// Timestamps of samples at or above the static threshold.
    pub fn motion_timestamps(&self, static_threshold: f64) -> Vec<TimestampNs> {
        self.samples
            .iter()
            .filter(|s| s.is_moving(static_threshold))
            .map(|s| s.timestamp_ns)
            .collect()
    }
}

/// Estimates per-pair velocity and heading over a pose stream.
pub struct VelocityEstimator {
    config: VelocityConfig,
}

impl VelocityEstimator {
    /// Create an estimator with the given configuration.
    pub fn new(config: VelocityConfig) -> Self {
        Self { config }
    }

    /// Create an estimator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(VelocityConfig::default())
    }

    pub fn config(&self) -> &VelocityConfig {
        &self.config
    }

    /// Estimate velocities for a complete, time-ordered pose stream.
    ///
    /// Fewer than two retained poses yield an empty profile.
    pub fn estimate(&self, poses: &[PoseSample]) -> ShiftwatchResult<VelocityProfile> {
        validate_poses(poses)?;
        self.estimate_validated(poses)
    }

    /// Estimate over a stream the caller has already validated.
    pub(crate) fn estimate_validated(
        &self,
        poses: &[PoseSample],
    ) -> ShiftwatchResult<VelocityProfile> {
        let stride = self.config.subsampling_stride;
        if stride == 0 {
            return Err(ShiftwatchError::config("subsampling_stride must be >= 1"));
        }

        let mut data_mask = vec![false; poses.len()];
        let retained: Vec<usize> = (0..poses.len()).step_by(stride).collect();
        if retained.len() < 2 {
            tracing::debug!(
                poses = poses.len(),
                stride,
                "Too few retained poses to estimate velocity"
            );
            return Ok(VelocityProfile {
                data_mask,
                ..Default::default()
            });
        }

        let mut samples = Vec::with_capacity(retained.len() - 1);
        let mut rejected_pairs = 0;
        for pair in retained.windows(2) {
            let (earlier, later) = (&poses[pair[0]], &poses[pair[1]]);
            let dt = later.timestamp_ns - earlier.timestamp_ns;
            if dt >= self.config.max_gap_ns || !earlier.shares_frame_with(later) {
                rejected_pairs += 1;
                continue;
            }

            let dx = later.x - earlier.x;
            let dy = later.y - earlier.y;
            data_mask[pair[1]] = true;
            samples.push(VelocitySample {
                timestamp_ns: earlier.timestamp_ns,
                speed: dx.hypot(dy),
                heading: Heading::from_delta(dx, dy, self.config.heading_epsilon),
                valid: true,
            });
        }

        tracing::debug!(
            pairs = samples.len() + rejected_pairs,
            valid = samples.len(),
            rejected = rejected_pairs,
            "Estimated velocities"
        );
        Ok(VelocityProfile {
            samples,
            rejected_pairs,
            data_mask,
        })
    }
}
