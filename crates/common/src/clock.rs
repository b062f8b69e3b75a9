//! Time helpers for nanosecond pose logs.
//!
//! Pose timestamps are signed nanoseconds since the Unix epoch. This module
//! provides utilities for:
//! - Converting seconds from the command line to nanoseconds
//! - Rendering timestamps and durations for humans
//! - Measuring the sampling cadence of a recorded stream

use chrono::{DateTime, SecondsFormat, Utc};

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Convert seconds to nanoseconds (truncating).
pub fn secs_to_ns(secs: f64) -> i64 {
    (secs * NANOS_PER_SEC as f64) as i64
}

/// Render a Unix-epoch nanosecond timestamp as RFC 3339 (UTC, millisecond precision).
pub fn format_timestamp_ns(ns: i64) -> String {
    let secs = ns.div_euclid(NANOS_PER_SEC);
    let nanos = ns.rem_euclid(NANOS_PER_SEC) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| format!("{ns}ns"))
}

/// Render a duration as `HhMMmSSs`, e.g. `1h02m03s`.
pub fn format_duration_ns(ns: i64) -> String {
    let sign = if ns < 0 { "-" } else { "" };
    let total = ns.unsigned_abs() / NANOS_PER_SEC as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{sign}{h}h{m:02}m{s:02}s")
    } else if m > 0 {
        format!("{sign}{m}m{s:02}s")
    } else {
        format!("{sign}{s}s")
    }
}

/// Median spacing between consecutive timestamps.
///
/// Returns `None` for fewer than two timestamps.
pub fn median_interval_ns(timestamps: &[i64]) -> Option<i64> {
    if timestamps.len() < 2 {
        return None;
    }

    let mut intervals: Vec<i64> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
    intervals.sort_unstable();
    Some(intervals[intervals.len() / 2])
}
