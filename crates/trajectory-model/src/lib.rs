//! Shiftwatch Trajectory Model
//!
//! Defines the data contracts shared by the analysis core and its collaborators:
//! - **Poses:** Timestamped 2-D positions tagged with a tracking reference frame
//! - **Velocity samples:** Per-pair speed, heading, and validity
//! - **Activity intervals:** Alternating active/inactive spans of a shift
//! - **Stop records:** Static runs anchored at a position
//! - **Shift windows:** Calendar day/night boundaries
//!
//! Positions are meters in the tracking system's frame; timestamps are
//! nanoseconds since the Unix epoch.

pub mod activity;
pub mod pose;
pub mod shift;
pub mod stop;
pub mod velocity;

pub use activity::*;
pub use pose::*;
pub use shift::*;
pub use stop::*;
pub use velocity::*;
