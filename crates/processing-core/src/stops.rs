//! Stop detection: run-length encoding of static samples.

use shiftwatch_common::error::{ShiftwatchError, ShiftwatchResult};
use shiftwatch_trajectory_model::pose::PoseSample;
use shiftwatch_trajectory_model::stop::StopRecord;

/// Finds maximal static runs among the masked poses.
pub struct StoppingLocationDetector {
    static_threshold: f64,
}

impl StoppingLocationDetector {
    /// Samples with speed strictly below `static_threshold` are static.
    pub fn new(static_threshold: f64) -> Self {
        Self { static_threshold }
    }

    pub fn static_threshold(&self) -> f64 {
        self.static_threshold
    }

    /// Detect stops.
    ///
    /// `data_mask` selects poses from `poses` (same length); `speeds` holds one
    /// value per selected pose, in order. A run ends at the last static
    /// sample, and is anchored at the position of its first sample.
    pub fn detect(
        &self,
        poses: &[PoseSample],
        data_mask: &[bool],
        speeds: &[f64],
    ) -> ShiftwatchResult<Vec<StopRecord>> {
        if data_mask.len() != poses.len() {
            return Err(ShiftwatchError::malformed(
                data_mask.len().min(poses.len()),
                format!(
                    "mask covers {} poses but stream has {}",
                    data_mask.len(),
                    poses.len()
                ),
            ));
        }
        let selected: Vec<&PoseSample> = poses
            .iter()
            .zip(data_mask)
            .filter_map(|(pose, &keep)| keep.then_some(pose))
            .collect();
        if selected.len() != speeds.len() {
            return Err(ShiftwatchError::malformed(
                selected.len().min(speeds.len()),
                format!(
                    "{} masked poses but {} speeds",
                    selected.len(),
                    speeds.len()
                ),
            ));
        }

        let mut stops = Vec::new();
        let mut open: Option<StopRecord> = None;

        for (pose, &speed) in selected.into_iter().zip(speeds) {
            if speed < self.static_threshold {
                match open.as_mut() {
                    Some(stop) => stop.end_ns = pose.timestamp_ns,
                    None => {
                        open = Some(StopRecord {
                            start_ns: pose.timestamp_ns,
                            end_ns: pose.timestamp_ns,
                            x: pose.x,
                            y: pose.y,
                        })
                    }
                }
            } else if let Some(stop) = open.take() {
                stops.push(stop);
            }
        }
        stops.extend(open);

        tracing::debug!(stops = stops.len(), "Detected stopping locations");
        Ok(stops)
    }
}
