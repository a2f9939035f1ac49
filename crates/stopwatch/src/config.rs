//! Stopwatch configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What `add_clock` does when the name is already registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateClock` (default)
    #[default]
    Reject,
    /// Replace the existing clock with a fresh one, keeping its position
    Replace,
}

/// Stopwatch construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwatchConfig {
    /// Overall title shown in summaries
    pub title: String,
    /// Key of the clock that always exists after construction/reinitialize
    pub default_clock_name: String,
    /// Title given to the default clock
    pub default_clock_title: String,
    /// Record per-lap detail on every clock
    pub record_lap_detail: bool,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            title: "StopWatch Default".to_string(),
            default_clock_name: "default".to_string(),
            default_clock_title: "default".to_string(),
            record_lap_detail: false,
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }
}

impl StopwatchConfig {
    /// Load from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid stopwatch config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Options for a whole-stopwatch summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryOptions {
    /// Report hidden clocks as if they were visible
    pub show_all: bool,
    /// Overall total is the default clock's total rather than the visible sum
    pub default_is_overall: bool,
}

/// Options for a single clock's summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSummaryOptions {
    /// Return only the humanized duration
    pub only_time: bool,
    /// Append " in N lap(s)"
    pub show_laps: bool,
}

impl Default for ClockSummaryOptions {
    fn default() -> Self {
        Self {
            only_time: false,
            show_laps: true,
        }
    }
}
