//! Shiftwatch Common Utilities
//!
//! Shared infrastructure for all Shiftwatch crates:
//! - Error types and result aliases
//! - Nanosecond time helpers for pose logs
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
