//! Input checks run before any differencing.
//!
//! NaN coordinates or out-of-order timestamps would otherwise flow silently
//! into speeds and interval boundaries. Both are rejected with the index of
//! the first offending element.

use shiftwatch_common::error::{ShiftwatchError, ShiftwatchResult};
use shiftwatch_trajectory_model::pose::{PoseSample, TimestampNs};

/// Reject poses with non-finite coordinates or decreasing timestamps.
///
/// Equal consecutive timestamps are accepted.
pub fn validate_poses(poses: &[PoseSample]) -> ShiftwatchResult<()> {
    for (index, pose) in poses.iter().enumerate() {
        if !pose.x.is_finite() || !pose.y.is_finite() {
            return Err(ShiftwatchError::malformed(
                index,
                format!("non-finite position ({}, {})", pose.x, pose.y),
            ));
        }
    }
    check_ascending(poses.iter().map(|p| p.timestamp_ns))
}

/// Reject a timestamp sequence that ever decreases.
pub fn check_ascending(timestamps: impl IntoIterator<Item = TimestampNs>) -> ShiftwatchResult<()> {
    let mut previous: Option<TimestampNs> = None;
    for (index, ts) in timestamps.into_iter().enumerate() {
        if let Some(prev) = previous {
            if ts < prev {
                return Err(ShiftwatchError::malformed(
                    index,
                    format!("timestamp {ts} precedes previous timestamp {prev}"),
                ));
            }
        }
        previous = Some(ts);
    }
    Ok(())
}
