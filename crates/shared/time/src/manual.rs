use chrono::{Duration, Utc};
use lapwatch_core::Timestamp;
use lapwatch_ports::TimeSource;
use std::sync::{Arc, Mutex, MutexGuard};

/// Frozen time that only moves when explicitly advanced
///
/// Cloning yields another handle onto the same instant, so a test can keep
/// one handle to drive time while the stopwatch reads through another.
#[derive(Debug, Clone)]
pub struct ManualTimeSource {
    current: Arc<Mutex<Timestamp>>,
}

impl ManualTimeSource {
    /// Create a source frozen at `initial_time`
    ///
    /// # Arguments
    /// * `initial_time` - Optional starting time. If None, uses current wall time.
    pub fn new(initial_time: Option<Timestamp>) -> Self {
        Self {
            current: Arc::new(Mutex::new(initial_time.unwrap_or_else(Utc::now))),
        }
    }

    /// Move time forward by `duration`
    pub fn advance(&self, duration: Duration) {
        *self.lock() += duration;
    }

    /// Move time forward by fractional seconds
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::microseconds((secs * 1_000_000.0).round() as i64));
    }

    /// Explicitly set the current time
    ///
    /// Warning: moving backwards makes an open segment measure as zero.
    pub fn set_time(&self, time: Timestamp) {
        *self.lock() = time;
    }

    fn lock(&self) -> MutexGuard<'_, Timestamp> {
        // A poisoned lock still holds a valid timestamp
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        *self.lock()
    }

    fn name(&self) -> &str {
        "ManualTimeSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_frozen_until_advanced() {
        let source = ManualTimeSource::new(None);
        let time1 = source.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let time2 = source.now();

        // Time does not advance on its own
        assert_eq!(time1, time2);

        source.advance(Duration::seconds(5));
        assert_eq!(source.now() - time1, Duration::seconds(5));
    }

    #[test]
    fn test_clones_share_time() {
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let driver = ManualTimeSource::new(Some(start));
        let reader = driver.clone();

        driver.advance_secs(1.5);
        assert_eq!(reader.now() - start, Duration::milliseconds(1_500));

        driver.set_time(start);
        assert_eq!(reader.now(), start);
    }
}
