//! Lapwatch Time Sources
//!
//! Adapters for the [`TimeSource`] port:
//!
//! - [`SystemTimeSource`] reads the real UTC wall clock
//! - [`ManualTimeSource`] is frozen until advanced, for deterministic tests
//!
//! ## Usage
//!
//! ```ignore
//! use lapwatch_time::{ManualTimeSource, TimeSource};
//! use chrono::Duration;
//!
//! let time = ManualTimeSource::new(None);
//! let start = time.now();
//! time.advance(Duration::seconds(5));     // Jump forward
//! assert_eq!(time.now() - start, Duration::seconds(5));
//! ```

mod manual;
mod system;

pub use manual::ManualTimeSource;
pub use system::SystemTimeSource;

// Re-export the TimeSource trait for convenience
pub use lapwatch_ports::TimeSource;
