//! Locations where a vehicle stood still.

use serde::{Deserialize, Serialize};

use crate::pose::TimestampNs;

/// A maximal static run, anchored at the position where it began.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    /// Timestamp of the first static sample.
    pub start_ns: TimestampNs,
    /// Timestamp of the last static sample.
    pub end_ns: TimestampNs,
    pub x: f64,
    pub y: f64,
}

/// Coarse stop duration class used by reports and plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopClass {
    Short,
    Long,
}

impl StopRecord {
    pub fn duration_ns(&self) -> i64 {
        self.end_ns - self.start_ns
    }

    /// `Long` when the stop lasted at least `long_stop_ns`.
    pub fn classify(&self, long_stop_ns: i64) -> StopClass {
        if self.duration_ns() >= long_stop_ns {
            StopClass::Long
        } else {
            StopClass::Short
        }
    }
}
