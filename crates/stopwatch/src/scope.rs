//! Scoped timing
//!
//! [`TimedScope`] starts a clock when created and, however the scope is left
//! (normal return, `?` or a panic unwinding through it), stops the clock and
//! emits `"{label}: Duration: ..."` to its [`SummarySink`].
//!
//! ```ignore
//! use lapwatch::{SummarySink, TimedScope, time_call};
//!
//! fn load() -> Result<(), Error> {
//!     let _timer = TimedScope::start("load", SummarySink::default());
//!     parse()?;   // summary is still emitted on early return
//!     Ok(())
//! }
//!
//! let rows = time_call("query", SummarySink::Stdout, || run_query());
//! ```

use std::fmt;
use std::sync::Arc;

use lapwatch_core::Seconds;
use lapwatch_ports::TimeSource;
use lapwatch_time::SystemTimeSource;
use log::{Level, log, warn};

use crate::clock_ref::ClockRef;
use crate::config::{ClockSummaryOptions, StopwatchConfig};
use crate::stopwatch::Stopwatch;

const SCOPE_CLOCK_NAME: &str = "scope";

/// Where a scope's summary goes
pub enum SummarySink {
    /// The `log` facade at the given level
    Log(Level),
    /// Standard output
    Stdout,
    Callback(Box<dyn FnMut(&str) + Send>),
}

impl SummarySink {
    /// Sink that calls `f` with each summary
    pub fn callback(f: impl FnMut(&str) + Send + 'static) -> Self {
        SummarySink::Callback(Box::new(f))
    }

    fn emit(&mut self, summary: &str) {
        match self {
            SummarySink::Log(level) => log!(*level, "{}", summary),
            SummarySink::Stdout => println!("{summary}"),
            SummarySink::Callback(f) => f(summary),
        }
    }
}

impl Default for SummarySink {
    fn default() -> Self {
        SummarySink::Log(Level::Debug)
    }
}

impl fmt::Debug for SummarySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummarySink::Log(level) => f.debug_tuple("Log").field(level).finish(),
            SummarySink::Stdout => f.write_str("Stdout"),
            SummarySink::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// A running clock that reports itself when dropped
#[must_use = "the scope stops timing as soon as it is dropped"]
#[derive(Debug)]
pub struct TimedScope {
    stopwatch: Stopwatch,
    sink: SummarySink,
    finished: bool,
}

impl TimedScope {
    /// Start timing `label` on the system clock
    pub fn start(label: impl Into<String>, sink: SummarySink) -> Self {
        Self::start_with_time_source(label, sink, Arc::new(SystemTimeSource::new()))
    }

    /// Start timing `label` on an explicit time source
    pub fn start_with_time_source(
        label: impl Into<String>,
        sink: SummarySink,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        let label = label.into();
        let config = StopwatchConfig {
            title: label.clone(),
            default_clock_name: SCOPE_CLOCK_NAME.to_string(),
            default_clock_title: label,
            ..Default::default()
        };
        let mut stopwatch = Stopwatch::with_time_source(config, time);
        if let Err(e) = stopwatch.start(ClockRef::Default) {
            warn!("Timed scope could not start: {}", e);
        }
        Self {
            stopwatch,
            sink,
            finished: false,
        }
    }

    /// Seconds since the scope started
    pub fn elapsed_seconds(&self) -> Seconds {
        self.stopwatch
            .clock_total_seconds(ClockRef::Default)
            .unwrap_or_default()
    }

    /// Stop now, emit the summary and return it
    pub fn finish(mut self) -> String {
        self.close().unwrap_or_default()
    }

    fn close(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        self.finished = true;

        if let Err(e) = self.stopwatch.stop(ClockRef::Default) {
            warn!("Timed scope could not stop: {}", e);
            return None;
        }
        let options = ClockSummaryOptions {
            show_laps: false,
            ..Default::default()
        };
        match self.stopwatch.clock_summary(ClockRef::Default, options) {
            Ok(summary) => {
                self.sink.emit(&summary);
                Some(summary)
            }
            Err(e) => {
                warn!("Timed scope could not summarize: {}", e);
                None
            }
        }
    }
}

impl Drop for TimedScope {
    fn drop(&mut self) {
        self.close();
    }
}

/// Time one call of `f`, emitting its summary to `sink` once it returns
pub fn time_call<T>(label: impl Into<String>, sink: SummarySink, f: impl FnOnce() -> T) -> T {
    let _scope = TimedScope::start(label, sink);
    f()
}
