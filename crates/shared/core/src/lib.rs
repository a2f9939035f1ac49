//! Lapwatch Core Domain
//!
//! Pure domain types for the lapwatch multi-clock stopwatch.
//! This crate contains no I/O and never reads the wall clock: every
//! transition is handed the instant it happens at, so it is 100% unit testable.

pub mod entities;
pub mod error;
pub mod humanize;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Clock, ClockState, Lap, Segment};
pub use error::{StopwatchError, StopwatchResult, TransitionError};
pub use humanize::{HumanDuration, humanize};
pub use values::{Seconds, Timestamp, seconds_between};
