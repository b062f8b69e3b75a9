//! Error types shared across Shiftwatch crates.

use std::path::PathBuf;

/// Top-level error type for Shiftwatch operations.
#[derive(Debug, thiserror::Error)]
pub enum ShiftwatchError {
    /// Input data violates an ordering or numeric contract.
    ///
    /// `index` points at the offending element of the input slice.
    #[error("Malformed input at index {index}: {reason}")]
    MalformedInput { index: usize, reason: String },

    #[error("Invalid shift window: end {end_ns} precedes start {start_ns}")]
    InvalidShiftWindow { start_ns: i64, end_ns: i64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ShiftwatchError.
pub type ShiftwatchResult<T> = Result<T, ShiftwatchError>;

impl ShiftwatchError {
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            index,
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Index of the offending input element, if this is an input error.
    pub fn offending_index(&self) -> Option<usize> {
        match self {
            Self::MalformedInput { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_reports_index() {
        let err = ShiftwatchError::malformed(42, "timestamp decreased");
        assert_eq!(err.offending_index(), Some(42));
        assert_eq!(
            err.to_string(),
            "Malformed input at index 42: timestamp decreased"
        );
    }

    #[test]
    fn test_config_error_has_no_index() {
        let err = ShiftwatchError::config("stride must be >= 1");
        assert_eq!(err.offending_index(), None);
        assert!(err.to_string().contains("stride"));
    }
}
