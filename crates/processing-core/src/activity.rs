//! Activity segmentation: from sparse motion evidence to shift intervals.
//!
//! Motion timestamps are point evidence that the vehicle is doing something.
//! Two motion events closer than `min_gap_ns` belong to one continuous task
//! even if the vehicle paused between them (picking up a pallet, waiting at a
//! dock). Only a break longer than the tolerance ends an active run.
//!
//! The result covers the shift window exactly: contiguous, non-overlapping,
//! alternating statuses.

use shiftwatch_common::error::{ShiftwatchError, ShiftwatchResult};
use shiftwatch_trajectory_model::activity::{ActivityInterval, ActivityStatus};
use shiftwatch_trajectory_model::pose::TimestampNs;
use shiftwatch_trajectory_model::shift::ShiftWindow;

use crate::validation::check_ascending;

/// Gap-merging segmenter for motion timestamps.
pub struct ActivityPeriodSegmenter {
    min_gap_ns: i64,
}

impl ActivityPeriodSegmenter {
    /// Create a segmenter; breaks longer than `min_gap_ns` end an active run.
    pub fn new(min_gap_ns: i64) -> Self {
        Self { min_gap_ns }
    }

    pub fn min_gap_ns(&self) -> i64 {
        self.min_gap_ns
    }

    /// Segment a shift given ascending motion timestamps.
    ///
    /// Motion outside the window is ignored. The first in-window motion opens
    /// the first active run; the span before it is inactive. Zero-length
    /// active runs (a lone motion event) are kept.
    pub fn segment(
        &self,
        window: ShiftWindow,
        motion_ns: &[TimestampNs],
    ) -> ShiftwatchResult<Vec<ActivityInterval>> {
        if window.end_ns < window.start_ns {
            return Err(ShiftwatchError::InvalidShiftWindow {
                start_ns: window.start_ns,
                end_ns: window.end_ns,
            });
        }
        check_ascending(motion_ns.iter().copied())?;

        let in_window = motion_ns.iter().copied().filter(|&t| window.contains(t));
        let discarded = motion_ns.len() - in_window.clone().count();
        if discarded > 0 {
            tracing::warn!(discarded, "Ignoring motion outside the shift window");
        }

        let mut intervals = Vec::new();
        let mut cursor = window.start_ns;
        let mut run_start: Option<TimestampNs> = None;

        for t in in_window {
            match run_start {
                None => {
                    if t > cursor {
                        intervals.push(ActivityInterval::inactive(cursor, t));
                    }
                    run_start = Some(t);
                }
                Some(start) if t - cursor > self.min_gap_ns => {
                    intervals.push(ActivityInterval::active(start, cursor));
                    intervals.push(ActivityInterval::inactive(cursor, t));
                    run_start = Some(t);
                }
                Some(_) => {}
            }
            cursor = t;
        }

        if let Some(start) = run_start {
            intervals.push(ActivityInterval::active(start, cursor));
        }
        if cursor < window.end_ns || intervals.is_empty() {
            intervals.push(ActivityInterval::inactive(cursor, window.end_ns));
        }

        tracing::debug!(
            intervals = intervals.len(),
            active = intervals
                .iter()
                .filter(|i| i.status == ActivityStatus::Active)
                .count(),
            "Segmented shift activity"
        );
        Ok(intervals)
    }
}

/// The intervals a storage policy keeps: active ones only.
pub fn active_only(intervals: &[ActivityInterval]) -> Vec<ActivityInterval> {
    intervals
        .iter()
        .filter(|i| i.status == ActivityStatus::Active)
        .copied()
        .collect()
}

/// Total time spent in `status`.
pub fn total_duration(intervals: &[ActivityInterval], status: ActivityStatus) -> i64 {
    intervals
        .iter()
        .filter(|i| i.status == status)
        .map(ActivityInterval::duration_ns)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: i64 = 1_000_000_000;

    #[test]
    fn test_no_motion_is_one_inactive_interval() {
        let segmenter = ActivityPeriodSegmenter::new(SEC);
        let intervals = segmenter
            .segment(ShiftWindow::new(0, 6 * SEC), &[])
            .unwrap();
        assert_eq!(intervals, vec![ActivityInterval::inactive(0, 6 * SEC)]);
    }

    #[test]
    fn test_empty_window_without_motion() {
        let segmenter = ActivityPeriodSegmenter::new(SEC);
        let intervals = segmenter.segment(ShiftWindow::new(5, 5), &[]).unwrap();
        assert_eq!(intervals, vec![ActivityInterval::inactive(5, 5)]);
    }

    #[test]
    fn test_break_longer_than_tolerance_splits_runs() {
        let segmenter = ActivityPeriodSegmenter::new(SEC);
        let motion = [100, 200, 5 * SEC + 100];
        let intervals = segmenter
            .segment(ShiftWindow::new(0, 6 * SEC), &motion)
            .unwrap();

        assert_eq!(
            intervals,
            vec![
                ActivityInterval::inactive(0, 100),
                ActivityInterval::active(100, 200),
                ActivityInterval::inactive(200, 5 * SEC + 100),
                ActivityInterval::active(5 * SEC + 100, 5 * SEC + 100),
                ActivityInterval::inactive(5 * SEC + 100, 6 * SEC),
            ]
        );
    }

    #[test]
    fn test_short_pauses_merge_into_one_run() {
        let segmenter = ActivityPeriodSegmenter::new(10 * SEC);
        let motion = [SEC, 8 * SEC, 17 * SEC, 27 * SEC];
        let intervals = segmenter
            .segment(ShiftWindow::new(0, 60 * SEC), &motion)
            .unwrap();

        assert_eq!(
            intervals,
            vec![
                ActivityInterval::inactive(0, SEC),
                ActivityInterval::active(SEC, 27 * SEC),
                ActivityInterval::inactive(27 * SEC, 60 * SEC),
            ]
        );
    }

    #[test]
    fn test_gap_equal_to_tolerance_does_not_split() {
        let segmenter = ActivityPeriodSegmenter::new(10);
        let intervals = segmenter
            .segment(ShiftWindow::new(0, 100), &[0, 10, 20])
            .unwrap();
        assert_eq!(
            intervals,
            vec![
                ActivityInterval::active(0, 20),
                ActivityInterval::inactive(20, 100),
            ]
        );
    }

    #[test]
    fn test_motion_at_shift_end_closes_run_without_trailing_gap() {
        let segmenter = ActivityPeriodSegmenter::new(10);
        let intervals = segmenter
            .segment(ShiftWindow::new(0, 100), &[95, 100])
            .unwrap();
        assert_eq!(
            intervals,
            vec![
                ActivityInterval::inactive(0, 95),
                ActivityInterval::active(95, 100),
            ]
        );
    }

    #[test]
    fn test_motion_outside_window_is_ignored() {
        let segmenter = ActivityPeriodSegmenter::new(10);
        let intervals = segmenter
            .segment(ShiftWindow::new(100, 200), &[50, 150, 250])
            .unwrap();
        assert_eq!(
            intervals,
            vec![
                ActivityInterval::inactive(100, 150),
                ActivityInterval::active(150, 150),
                ActivityInterval::inactive(150, 200),
            ]
        );
    }

    #[test]
    fn test_descending_motion_is_malformed() {
        let segmenter = ActivityPeriodSegmenter::new(10);
        let err = segmenter
            .segment(ShiftWindow::new(0, 100), &[10, 30, 20])
            .unwrap_err();
        assert_eq!(err.offending_index(), Some(2));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let segmenter = ActivityPeriodSegmenter::new(10);
        let err = segmenter.segment(ShiftWindow::new(100, 0), &[]).unwrap_err();
        assert!(matches!(err, ShiftwatchError::InvalidShiftWindow { .. }));
    }

    #[test]
    fn test_active_only_and_totals() {
        let intervals = vec![
            ActivityInterval::inactive(0, 10),
            ActivityInterval::active(10, 40),
            ActivityInterval::inactive(40, 100),
        ];
        assert_eq!(active_only(&intervals), vec![ActivityInterval::active(10, 40)]);
        assert_eq!(total_duration(&intervals, ActivityStatus::Active), 30);
        assert_eq!(total_duration(&intervals, ActivityStatus::Inactive), 70);
    }
}
