//! Lapwatch Ports
//!
//! Port definitions (traits) for the lapwatch multi-clock stopwatch.
//! These define the boundary between the clock engine and its time source.

mod time_source;

pub use time_source::TimeSource;
