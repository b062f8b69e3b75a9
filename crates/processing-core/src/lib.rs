//! Shiftwatch Processing Core — trajectory analysis
//!
//! Derives shift-level facts from a recorded pose stream:
//! - **Velocity:** Subsample poses and difference consecutive pairs, rejecting
//!   pairs that span a relocalization or a tracking dropout
//! - **Activity:** Merge sparse motion evidence into alternating
//!   active/inactive intervals covering the shift window
//! - **Stops:** Run-length encode static samples into anchored stop records
//!
//! This crate is pure computation — no I/O, no shared state.
//! All inputs are data; all outputs are data.

pub mod activity;
pub mod pipeline;
pub mod stops;
pub mod validation;
pub mod velocity;

pub use activity::ActivityPeriodSegmenter;
pub use pipeline::{ShiftAnalyzer, ShiftReport, ShiftSummary};
pub use stops::StoppingLocationDetector;
pub use velocity::{VelocityConfig, VelocityEstimator, VelocityProfile};
