use chrono::{DateTime, Utc};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Elapsed time in fractional seconds
/// Stored totals are never rounded; rounding is a display concern only
pub type Seconds = f64;

/// Fractional seconds elapsed from `begin` to `end`
///
/// An `end` earlier than `begin` yields zero, so a closed segment can never
/// shrink an accumulated total.
pub fn seconds_between(begin: Timestamp, end: Timestamp) -> Seconds {
    let delta = end - begin;
    let secs = match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1_000_000_000.0,
        // Beyond ~292 years of nanoseconds; millisecond precision is plenty
        None => delta.num_milliseconds() as f64 / 1_000.0,
    };
    secs.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn epoch() -> Timestamp {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_fractional_seconds() {
        let begin = epoch();
        let end = begin + Duration::milliseconds(1_250);
        assert_relative_eq!(seconds_between(begin, end), 1.25);
    }

    #[test]
    fn test_backwards_interval_is_zero() {
        let begin = epoch();
        let end = begin - Duration::seconds(3);
        assert_eq!(seconds_between(begin, end), 0.0);
    }

    #[test]
    fn test_huge_interval_falls_back_to_millis() {
        let begin = epoch();
        let end = begin + Duration::days(365 * 300);
        assert_relative_eq!(seconds_between(begin, end), (365_i64 * 300 * 86_400) as f64);
    }
}
