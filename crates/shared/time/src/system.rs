use chrono::Utc;
use lapwatch_core::Timestamp;
use lapwatch_ports::TimeSource;

/// Reads the UTC wall clock on every call
///
/// The source a stopwatch uses unless it is given another one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemTimeSource"
    }
}
