//! Human-readable durations
//!
//! Splits a seconds total into days, hours, minutes and seconds by repeated
//! floor division and renders only the non-zero parts, largest first:
//!
//! ```text
//! 0.0      -> "0 seconds"
//! 1.25     -> "1.25 seconds"
//! 3661.0   -> "1 hour 1 minute 1 second"
//! 90061.5  -> "1 day 1 hour 1 minute 1.5 seconds"
//! ```
//!
//! Rounding to whole milliseconds happens here and only here; totals held by
//! clocks are never rounded.

use std::fmt;

use crate::values::Seconds;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;

/// A seconds total broken into display components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HumanDuration {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    /// Remaining seconds, in milliseconds
    pub millis: u64,
}

impl HumanDuration {
    pub fn from_seconds(secs: Seconds) -> Self {
        let total_millis = if secs.is_finite() && secs > 0.0 {
            (secs * MILLIS_PER_SECOND as f64).round() as u64
        } else {
            0
        };

        let (mut days, mut hours, mut minutes) = (0, 0, 0);
        let mut millis = total_millis;
        if millis >= MILLIS_PER_MINUTE {
            minutes = millis / MILLIS_PER_MINUTE;
            millis %= MILLIS_PER_MINUTE;
        }
        if minutes >= 60 {
            hours = minutes / 60;
            minutes %= 60;
        }
        if hours >= 24 {
            days = hours / 24;
            hours %= 24;
        }

        Self {
            days,
            hours,
            minutes,
            millis,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0 seconds");
        }

        let mut parts = Vec::with_capacity(4);
        for (value, unit) in [
            (self.days, "day"),
            (self.hours, "hour"),
            (self.minutes, "minute"),
        ] {
            if value > 0 {
                parts.push(format!("{value} {unit}{}", plural(value == 1)));
            }
        }
        if self.millis > 0 {
            parts.push(format!(
                "{} second{}",
                format_seconds(self.millis),
                plural(self.millis == MILLIS_PER_SECOND)
            ));
        }

        f.write_str(&parts.join(" "))
    }
}

/// Render a seconds total for display
pub fn humanize(secs: Seconds) -> String {
    HumanDuration::from_seconds(secs).to_string()
}

fn plural(singular: bool) -> &'static str {
    if singular { "" } else { "s" }
}

/// `1500` -> `"1.5"`, `2000` -> `"2"`
fn format_seconds(millis: u64) -> String {
    let whole = millis / MILLIS_PER_SECOND;
    let frac = millis % MILLIS_PER_SECOND;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:03}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
