//! Shift analysis pipeline.
//!
//! Runs the full chain for one vehicle and one shift:
//!
//! 1. **Validate** the pose stream (fail fast on NaN / reordering).
//! 2. **Filter** to one reference frame category, if configured.
//! 3. **Estimate** velocities and the data mask.
//! 4. **Threshold** valid speeds into motion evidence.
//! 5. **Segment** the shift into active/inactive intervals.
//! 6. **Detect** stops over the masked poses.

use serde::{Deserialize, Serialize};
use shiftwatch_common::config::AnalysisConfig;
use shiftwatch_common::error::{ShiftwatchError, ShiftwatchResult};
use shiftwatch_trajectory_model::activity::{ActivityInterval, ActivityStatus};
use shiftwatch_trajectory_model::pose::{PoseSample, ReferenceFrameCategory};
use shiftwatch_trajectory_model::shift::ShiftWindow;
use shiftwatch_trajectory_model::stop::{StopClass, StopRecord};
use shiftwatch_trajectory_model::velocity::VelocitySample;

use crate::activity::{total_duration, ActivityPeriodSegmenter};
use crate::stops::StoppingLocationDetector;
use crate::validation::validate_poses;
use crate::velocity::{VelocityConfig, VelocityEstimator};

/// Everything derived from one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub window: ShiftWindow,
    pub activity: Vec<ActivityInterval>,
    pub stops: Vec<ClassifiedStop>,
    /// Valid velocity samples; empty unless trajectory recording is enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trajectory: Vec<VelocitySample>,
    pub summary: ShiftSummary,
}

/// A stop with its duration class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedStop {
    #[serde(flatten)]
    pub stop: StopRecord,
    pub class: StopClass,
}

/// Headline numbers for a shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// Poses in the input stream.
    pub poses: usize,
    /// Poses remaining after the frame category filter.
    pub analyzed_poses: usize,
    pub valid_pairs: usize,
    pub rejected_pairs: usize,
    pub motion_samples: usize,
    pub active_ns: i64,
    pub inactive_ns: i64,
    pub stop_count: usize,
    pub long_stop_count: usize,
}

/// Runs velocity estimation, activity segmentation and stop detection.
pub struct ShiftAnalyzer {
    config: AnalysisConfig,
    frame_filter: Option<ReferenceFrameCategory>,
}

impl ShiftAnalyzer {
    /// Create an analyzer. Fails on out-of-range parameters or an unknown
    /// frame category name.
    pub fn new(config: AnalysisConfig) -> ShiftwatchResult<Self> {
        config.validate()?;
        let frame_filter = config
            .frame_category
            .as_deref()
            .map(|name| {
                name.parse::<ReferenceFrameCategory>()
                    .map_err(|e| ShiftwatchError::config(e.to_string()))
            })
            .transpose()?;
        Ok(Self {
            config,
            frame_filter,
        })
    }

    /// Create an analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: AnalysisConfig::default(),
            frame_filter: None,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one vehicle's poses for one shift.
    ///
    /// The stream is validated once, before the frame filter, so errors
    /// report indices into `poses`.
    pub fn analyze(
        &self,
        poses: &[PoseSample],
        window: ShiftWindow,
    ) -> ShiftwatchResult<ShiftReport> {
        validate_poses(poses)?;

        let filtered: Vec<PoseSample>;
        let analyzed: &[PoseSample] = match self.frame_filter {
            Some(category) => {
                filtered = poses
                    .iter()
                    .filter(|p| p.frame.category == category)
                    .copied()
                    .collect();
                tracing::debug!(
                    %category,
                    kept = filtered.len(),
                    dropped = poses.len() - filtered.len(),
                    "Filtered poses by reference frame"
                );
                &filtered
            }
            None => poses,
        };

        let estimator = VelocityEstimator::new(VelocityConfig::from(&self.config));
        let profile = estimator.estimate_validated(analyzed)?;
        if profile.rejected_count() > 0 {
            tracing::warn!(
                rejected = profile.rejected_count(),
                "Dropped velocity pairs spanning a frame change or tracking gap"
            );
        }

        let motion = profile.motion_timestamps(self.config.static_threshold);
        let activity = ActivityPeriodSegmenter::new(self.config.min_activity_gap_ns)
            .segment(window, &motion)?;

        let detector = StoppingLocationDetector::new(self.config.static_threshold);
        let stops: Vec<ClassifiedStop> = detector
            .detect(analyzed, &profile.data_mask, &profile.speeds())?
            .into_iter()
            .map(|stop| ClassifiedStop {
                class: stop.classify(self.config.long_stop_ns),
                stop,
            })
            .collect();

        let summary = ShiftSummary {
            poses: poses.len(),
            analyzed_poses: analyzed.len(),
            valid_pairs: profile.valid_count(),
            rejected_pairs: profile.rejected_count(),
            motion_samples: motion.len(),
            active_ns: total_duration(&activity, ActivityStatus::Active),
            inactive_ns: total_duration(&activity, ActivityStatus::Inactive),
            stop_count: stops.len(),
            long_stop_count: stops.iter().filter(|s| s.class == StopClass::Long).count(),
        };

        tracing::info!(
            intervals = activity.len(),
            stops = summary.stop_count,
            active_ns = summary.active_ns,
            "Shift analysis complete"
        );

        let trajectory = if self.config.record_trajectory {
            profile.samples
        } else {
            vec![]
        };

        Ok(ShiftReport {
            window,
            activity,
            stops,
            trajectory,
            summary,
        })
    }
}
