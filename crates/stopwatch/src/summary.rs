//! Summaries
//!
//! Folds per-clock values into a [`SummaryReport`]. The report is the
//! structured form (serializable to JSON); its `Display` is the text block.
//!
//! ## Totals
//!
//! - **overall**: sum of the visible clocks' totals, or only the default
//!   clock's total when `default_is_overall` is set
//! - **combined**: sum of every clock's total, visible or hidden
//! - **hidden**: count, live total and live lap count of the hidden clocks
//!
//! Per-clock totals are the closed totals as of each clock's last stop or
//! pause; the hidden rollup reads live values, so a still-running hidden clock
//! shows its progress there.

use std::fmt;

use lapwatch_core::{
    Clock, ClockState, Seconds, StopwatchError, StopwatchResult, Timestamp, humanize,
};
use serde::Serialize;

use crate::config::{ClockSummaryOptions, SummaryOptions};

const RULE_WIDTH: usize = 90;

/// One clock's line in a summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockReport {
    pub name: String,
    pub title: String,
    pub state: ClockState,
    pub total_seconds: Seconds,
    pub laps: u32,
    pub ever_used: bool,
}

impl ClockReport {
    fn from_clock(clock: &Clock) -> Self {
        Self {
            name: clock.name().to_string(),
            title: clock.title().to_string(),
            state: clock.state(),
            total_seconds: clock.accumulated_seconds(),
            laps: clock.completed_laps(),
            ever_used: clock.ever_used(),
        }
    }
}

impl fmt::Display for ClockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.ever_used {
            return write!(f, "{}: never used.", self.title);
        }
        write!(
            f,
            "{}: Duration: {} in {} lap(s)",
            self.title,
            humanize(self.total_seconds),
            self.laps
        )?;
        if self.state.is_lap_open() {
            write!(f, " (lap in progress)")?;
        }
        Ok(())
    }
}

/// Rollup of clocks excluded from the per-clock listing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HiddenRollup {
    pub count: usize,
    pub total_seconds: Seconds,
    pub laps: u32,
}

/// Whole-stopwatch report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub title: String,
    /// Visible clocks (all clocks under `show_all`), in registration order
    pub clocks: Vec<ClockReport>,
    pub hidden: HiddenRollup,
    pub overall_seconds: Seconds,
    pub combined_seconds: Seconds,
    pub default_is_overall: bool,
}

impl SummaryReport {
    pub(crate) fn build<'a>(
        title: &str,
        default_clock_name: &str,
        clocks: impl IntoIterator<Item = &'a Clock>,
        now: Timestamp,
        options: SummaryOptions,
    ) -> Self {
        let mut report = Self {
            title: title.to_string(),
            clocks: Vec::new(),
            hidden: HiddenRollup::default(),
            overall_seconds: 0.0,
            combined_seconds: 0.0,
            default_is_overall: options.default_is_overall,
        };
        let mut visible_seconds = 0.0;
        let mut default_seconds = None;

        for clock in clocks {
            let total = clock.accumulated_seconds();
            report.combined_seconds += total;
            if clock.name() == default_clock_name {
                default_seconds = Some(total);
            }

            if options.show_all || clock.is_visible() {
                visible_seconds += total;
                report.clocks.push(ClockReport::from_clock(clock));
            } else {
                report.hidden.count += 1;
                report.hidden.total_seconds += clock.current_total_seconds(now);
                report.hidden.laps += clock.current_lap_count();
            }
        }

        report.overall_seconds = match default_seconds {
            Some(total) if options.default_is_overall => total,
            // Without a default clock there is nothing to single out
            _ => visible_seconds,
        };
        report
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary for {} stop watch", self.title)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        for clock in &self.clocks {
            writeln!(f, "{clock}")?;
        }
        if self.hidden.count > 0 {
            writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
            writeln!(
                f,
                "{} Hidden Clock(s): {} in {} lap(s)",
                self.hidden.count,
                humanize(self.hidden.total_seconds),
                self.hidden.laps
            )?;
        }
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Total Duration: {}", humanize(self.overall_seconds))?;
        write!(f, "Combined Duration: {}", humanize(self.combined_seconds))
    }
}

/// Render one clock's summary line
pub(crate) fn clock_summary(
    clock: &Clock,
    options: ClockSummaryOptions,
) -> StopwatchResult<String> {
    if !clock.ever_used() {
        return Ok(format!("{}: never used.", clock.title()));
    }
    if clock.state().is_lap_open() {
        return Err(StopwatchError::NotYetStopped(clock.name().to_string()));
    }

    let duration = humanize(clock.accumulated_seconds());
    if options.only_time {
        return Ok(duration);
    }
    let mut line = format!("{}: Duration: {}", clock.title(), duration);
    if options.show_laps {
        line.push_str(&format!(" in {} lap(s)", clock.completed_laps()));
    }
    Ok(line)
}
