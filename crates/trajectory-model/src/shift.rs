//! Work shift windows.
//!
//! Sites run two shifts: day (06:00–18:00 local) and night (18:00–06:00
//! local, spanning midnight). The window for a recorded session is derived
//! from the local calendar date of its earliest pose.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::pose::TimestampNs;

/// Local hour at which the day shift starts.
pub const DAY_SHIFT_START_HOUR: u32 = 6;

/// Local hour at which the night shift starts.
pub const NIGHT_SHIFT_START_HOUR: u32 = 18;

/// Which of the two daily shifts a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    Day,
    Night,
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => f.write_str("day"),
            Self::Night => f.write_str("night"),
        }
    }
}

impl FromStr for ShiftKind {
    type Err = ShiftWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            other => Err(ShiftWindowError::UnknownShiftKind(other.to_string())),
        }
    }
}

/// Errors deriving a shift window from the calendar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShiftWindowError {
    #[error("unknown shift kind {0:?} (expected \"day\" or \"night\")")]
    UnknownShiftKind(String),

    #[error("local time {0} does not exist in the site time zone")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("shift boundary is outside the representable timestamp range")]
    OutOfRange,
}

/// Inclusive time bounds of one work shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start_ns: TimestampNs,
    pub end_ns: TimestampNs,
}

impl ShiftWindow {
    pub fn new(start_ns: TimestampNs, end_ns: TimestampNs) -> Self {
        Self { start_ns, end_ns }
    }

    /// Window of the `kind` shift that a session starting at `earliest_ns` belongs to.
    ///
    /// A night session whose first pose is before 18:00 local is assumed to
    /// have started the previous evening.
    pub fn for_session<Tz: TimeZone>(
        earliest_ns: TimestampNs,
        kind: ShiftKind,
        tz: &Tz,
    ) -> Result<Self, ShiftWindowError> {
        let earliest = tz.timestamp_nanos(earliest_ns).naive_local();
        let date = earliest.date();

        let (start_date, end_date, start_hour, end_hour) = match kind {
            ShiftKind::Day => (date, date, DAY_SHIFT_START_HOUR, NIGHT_SHIFT_START_HOUR),
            ShiftKind::Night if earliest.hour() < NIGHT_SHIFT_START_HOUR => (
                date.pred_opt().ok_or(ShiftWindowError::OutOfRange)?,
                date,
                NIGHT_SHIFT_START_HOUR,
                DAY_SHIFT_START_HOUR,
            ),
            ShiftKind::Night => (
                date,
                date.succ_opt().ok_or(ShiftWindowError::OutOfRange)?,
                NIGHT_SHIFT_START_HOUR,
                DAY_SHIFT_START_HOUR,
            ),
        };

        Ok(Self {
            start_ns: local_hour_ns(tz, start_date, start_hour)?,
            end_ns: local_hour_ns(tz, end_date, end_hour)?,
        })
    }

    pub fn duration_ns(&self) -> i64 {
        self.end_ns - self.start_ns
    }

    pub fn contains(&self, timestamp_ns: TimestampNs) -> bool {
        self.start_ns <= timestamp_ns && timestamp_ns <= self.end_ns
    }
}

/// Nanosecond timestamp of `hour:00` local time on `date`.
fn local_hour_ns<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    hour: u32,
) -> Result<TimestampNs, ShiftWindowError> {
    let naive = date
        .and_hms_opt(hour, 0, 0)
        .ok_or(ShiftWindowError::OutOfRange)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or(ShiftWindowError::NonexistentLocalTime(naive))?
        .timestamp_nanos_opt()
        .ok_or(ShiftWindowError::OutOfRange)
}
