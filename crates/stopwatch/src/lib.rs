//! Lapwatch
//!
//! A multi-clock stopwatch for instrumenting phases of a larger program:
//! - **Named clocks**: start/stop/pause/unpause any number of independent clocks
//! - **Bulk operations**: start, stop, pause or reset every clock at one instant
//! - **Summaries**: per-clock lines plus visible/hidden/overall/combined totals,
//!   as text or as a serializable report
//! - **Scoped timing**: a guard that reports a block's duration however it exits
//!
//! ## Clock lifecycle
//!
//! ```text
//!            start              pause
//!   Idle ───────────► Running ─────────► Paused
//!    ▲                 │   ▲               │
//!    │ reset      stop │   └───unpause─────┘
//!    │                 ▼                   │ stop
//!    └──────────── Stopped ◄───────────────┘
//!                   │  ▲
//!                   └──┘ start (next lap)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lapwatch::{ClockRef, Stopwatch, SummaryOptions};
//!
//! let mut sw = Stopwatch::new();
//! sw.add_clock("io", "Disk I/O", true)?;
//!
//! sw.start(ClockRef::Default)?;
//! for chunk in chunks {
//!     sw.start("io")?;
//!     read(chunk);
//!     sw.stop("io")?;
//! }
//! sw.stop(ClockRef::Default)?;
//!
//! println!("{}", sw.summary(SummaryOptions::default()));
//! ```

pub mod clock_ref;
pub mod config;
pub mod scope;
pub mod stopwatch;
pub mod summary;

// Re-export main types
pub use clock_ref::ClockRef;
pub use config::{
    ClockSummaryOptions, ConfigError, DuplicatePolicy, StopwatchConfig, SummaryOptions,
};
pub use scope::{SummarySink, TimedScope, time_call};
pub use stopwatch::Stopwatch;
pub use summary::{ClockReport, HiddenRollup, SummaryReport};

// Re-export the domain and time source types embedders need
pub use lapwatch_core::{
    Clock, ClockState, Lap, Seconds, StopwatchError, StopwatchResult, Timestamp, humanize,
};
pub use lapwatch_time::{ManualTimeSource, SystemTimeSource, TimeSource};
