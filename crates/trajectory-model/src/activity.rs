//! Activity intervals of a work shift.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pose::TimestampNs;

/// Whether the vehicle was working during an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Active,
    Inactive,
}

impl ActivityStatus {
    /// Integer code used by the activity table (`1` active, `0` inactive).
    pub fn storage_code(&self) -> i32 {
        match self {
            Self::Active => 1,
            Self::Inactive => 0,
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Inactive => f.write_str("inactive"),
        }
    }
}

/// A span of a shift with uniform activity status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityInterval {
    pub start_ns: TimestampNs,
    pub end_ns: TimestampNs,
    pub status: ActivityStatus,
}

impl ActivityInterval {
    pub fn new(start_ns: TimestampNs, end_ns: TimestampNs, status: ActivityStatus) -> Self {
        Self {
            start_ns,
            end_ns,
            status,
        }
    }

    pub fn active(start_ns: TimestampNs, end_ns: TimestampNs) -> Self {
        Self::new(start_ns, end_ns, ActivityStatus::Active)
    }

    pub fn inactive(start_ns: TimestampNs, end_ns: TimestampNs) -> Self {
        Self::new(start_ns, end_ns, ActivityStatus::Inactive)
    }

    pub fn duration_ns(&self) -> i64 {
        self.end_ns - self.start_ns
    }
}

/// Row layout of the activity table: status as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredActivity {
    pub start_ns: TimestampNs,
    pub end_ns: TimestampNs,
    pub status: i32,
}

impl From<&ActivityInterval> for StoredActivity {
    fn from(interval: &ActivityInterval) -> Self {
        Self {
            start_ns: interval.start_ns,
            end_ns: interval.end_ns,
            status: interval.status.storage_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_codes() {
        assert_eq!(ActivityStatus::Active.storage_code(), 1);
        assert_eq!(ActivityStatus::Inactive.storage_code(), 0);
    }

    #[test]
    fn test_stored_row_uses_status_code() {
        let row = StoredActivity::from(&ActivityInterval::active(100, 250));
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"start_ns":100,"end_ns":250,"status":1}"#);
        assert_eq!(StoredActivity::from(&ActivityInterval::inactive(0, 1)).status, 0);
    }

    #[test]
    fn test_interval_json() {
        let interval = ActivityInterval::active(100, 250);
        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(json, r#"{"start_ns":100,"end_ns":250,"status":"active"}"#);
        assert_eq!(interval.duration_ns(), 150);
    }
}
