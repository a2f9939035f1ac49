//! Stopwatch Integration Test
//!
//! Drives a full stopwatch through the scenarios it exists for:
//! 1. Timing the default clock (including one real one-second run)
//! 2. Pausing inside a lap
//! 3. Several visible clocks summed into overall/combined totals
//! 4. Hidden clocks rolled up apart from the visible total
//! 5. Misuse surfacing as errors

use std::sync::Arc;
use std::thread;
use std::time::Duration as StdDuration;

use approx::assert_relative_eq;
use lapwatch::{
    ClockRef, ClockState, ClockSummaryOptions, ManualTimeSource, Stopwatch, StopwatchConfig,
    StopwatchError, SummaryOptions,
};

fn manual_stopwatch(config: StopwatchConfig) -> (Stopwatch, ManualTimeSource) {
    let _ = env_logger::try_init();
    let time = ManualTimeSource::new(None);
    let stopwatch = Stopwatch::with_time_source(config, Arc::new(time.clone()));
    (stopwatch, time)
}

/// Two laps on the default clock (and optionally on "clock2" / hidden "clock3"):
/// lap 1 runs 1s; lap 2 runs 1s, pauses 1s, runs 1s, pauses 1s, runs 1s,
/// pauses 1s and stops. Active time is 4s over 2 laps.
fn run_clocks(sw: &mut Stopwatch, time: &ManualTimeSource, multi: bool, with_hidden: bool) {
    if multi {
        sw.add_clock("clock2", "Clock 2", true).unwrap();
    }
    if with_hidden {
        sw.add_clock("clock3", "Hidden Clock", false).unwrap();
    }
    let extra: Vec<&str> = [(multi, "clock2"), (with_hidden, "clock3")]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();

    // Lap 1
    sw.start_all();
    time.advance_secs(1.0);
    sw.stop_all();

    // Lap 2
    sw.start_all();
    time.advance_secs(1.0);
    sw.pause(ClockRef::Default).unwrap();
    if multi {
        sw.pause("clock2").unwrap();
    }
    time.advance_secs(1.0);
    sw.unpause(ClockRef::Default).unwrap();
    if multi {
        sw.unpause("clock2").unwrap();
    }
    time.advance_secs(1.0);
    sw.pause(ClockRef::Default).unwrap();
    if multi {
        sw.pause("clock2").unwrap();
    }
    if with_hidden {
        sw.pause("clock3").unwrap();
    }
    time.advance_secs(1.0);
    sw.unpause(ClockRef::Default).unwrap();
    if multi {
        sw.unpause("clock2").unwrap();
    }
    time.advance_secs(1.0);
    sw.pause(ClockRef::Default).unwrap();
    time.advance_secs(1.0);
    sw.stop(ClockRef::Default).unwrap();
    for name in extra {
        sw.stop(name).unwrap();
    }
}

#[test]
fn test_one_second_run_in_real_time() {
    let _ = env_logger::try_init();
    let mut sw = Stopwatch::new();

    sw.start(ClockRef::Default).unwrap();
    thread::sleep(StdDuration::from_secs(1));
    sw.stop(ClockRef::Default).unwrap();

    assert_eq!(sw.clock_lap_count(ClockRef::Default).unwrap(), 1);
    let total = sw.clock_total_seconds(ClockRef::Default).unwrap();
    assert!((1.0..1.5).contains(&total), "unexpected total {total}");

    let summary = sw
        .clock_summary(ClockRef::Default, ClockSummaryOptions::default())
        .unwrap();
    assert!(summary.starts_with("default: Duration: 1"), "{summary}");
    assert!(summary.contains(" second"), "{summary}");
    assert!(summary.ends_with("in 1 lap(s)"), "{summary}");
}

#[test]
fn test_one_second_run_reports_one_second() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    sw.start(ClockRef::Default).unwrap();
    time.advance_secs(1.0);
    sw.stop(ClockRef::Default).unwrap();

    assert_eq!(
        sw.clock_summary(ClockRef::Default, ClockSummaryOptions::default())
            .unwrap(),
        "default: Duration: 1 second in 1 lap(s)"
    );
}

#[test]
fn test_pause_excluded_from_total() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    run_clocks(&mut sw, &time, false, false);

    assert_relative_eq!(sw.clock_total_seconds(ClockRef::Default).unwrap(), 4.0);
    assert_eq!(sw.clock_lap_count(ClockRef::Default).unwrap(), 2);
}

#[test]
fn test_run_pause_run_is_one_lap() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    sw.start(ClockRef::Default).unwrap();
    time.advance_secs(1.0);
    sw.pause(ClockRef::Default).unwrap();
    time.advance_secs(1.0);
    sw.unpause(ClockRef::Default).unwrap();
    time.advance_secs(1.0);
    sw.pause(ClockRef::Default).unwrap();
    sw.stop(ClockRef::Default).unwrap();

    assert_relative_eq!(sw.clock_total_seconds(ClockRef::Default).unwrap(), 2.0);
    assert_eq!(sw.clock_lap_count(ClockRef::Default).unwrap(), 1);
}

#[test]
fn test_lap_detail() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig {
        record_lap_detail: true,
        ..Default::default()
    });
    run_clocks(&mut sw, &time, false, false);

    assert_relative_eq!(sw.lap_detail(ClockRef::Default, 1).unwrap().total_seconds(), 1.0);
    assert_relative_eq!(sw.lap_detail(ClockRef::Default, 2).unwrap().total_seconds(), 3.0);
    assert!(matches!(
        sw.lap_detail(ClockRef::Default, 3),
        Err(StopwatchError::LapNotFound { lap: 3, .. })
    ));
}

#[test]
fn test_no_lap_detail_by_default() {
    let (mut sw, _time) = manual_stopwatch(StopwatchConfig::default());
    sw.start(ClockRef::Default).unwrap();
    sw.stop(ClockRef::Default).unwrap();

    assert!(!sw.has_lap_detail(ClockRef::Default).unwrap());
    assert_eq!(
        sw.lap_detail(ClockRef::Default, 1).map(|lap| lap.number()),
        Err(StopwatchError::LapDetailDisabled("default".into()))
    );
}

#[test]
fn test_lap_count_while_started() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    run_clocks(&mut sw, &time, false, false);

    sw.start(ClockRef::Default).unwrap();
    time.advance_secs(1.0);
    assert_eq!(sw.clock_lap_count(ClockRef::Default).unwrap(), 3);
    assert_relative_eq!(sw.clock_total_seconds(ClockRef::Default).unwrap(), 5.0);
    assert_eq!(
        sw.clock_summary(ClockRef::Default, ClockSummaryOptions::default()),
        Err(StopwatchError::NotYetStopped("default".into()))
    );
}

#[test]
fn test_combined_is_default_plus_clock2() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    run_clocks(&mut sw, &time, true, false);

    let default_total = sw.clock_total_seconds(ClockRef::Default).unwrap();
    let clock2_total = sw.clock_total_seconds("clock2").unwrap();
    let summary = sw.summary(SummaryOptions::default());

    assert_eq!(summary.combined_seconds, default_total + clock2_total);
    assert_eq!(summary.overall_seconds, default_total + clock2_total);
}

#[test]
fn test_default_is_overall() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    run_clocks(&mut sw, &time, true, false);

    let summary = sw.summary(SummaryOptions {
        default_is_overall: true,
        ..Default::default()
    });
    let default_total = sw.clock_total_seconds(ClockRef::Default).unwrap();
    let clock2_total = sw.clock_total_seconds("clock2").unwrap();

    assert_eq!(summary.overall_seconds, default_total);
    assert_eq!(summary.combined_seconds, default_total + clock2_total);
}

#[test]
fn test_hidden_clock_rollup() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    run_clocks(&mut sw, &time, false, true);

    let default_total = sw.clock_total_seconds(ClockRef::Default).unwrap();
    let summary = sw.summary(SummaryOptions::default());

    assert_eq!(summary.clocks.len(), 1);
    assert_eq!(summary.clocks[0].name, "default");
    assert_eq!(summary.hidden.count, 1);
    assert_eq!(summary.hidden.laps, 2);
    assert_eq!(summary.overall_seconds, default_total);
    assert_eq!(summary.combined_seconds, default_total + summary.hidden.total_seconds);

    let text = summary.to_string();
    assert!(text.contains("1 Hidden Clock(s): "), "{text}");
    assert!(!text.contains("Hidden Clock:"), "{text}");

    let everything = sw.summary(SummaryOptions {
        show_all: true,
        ..Default::default()
    });
    assert_eq!(everything.clocks.len(), 2);
    assert_eq!(everything.hidden.count, 0);
}

#[test]
fn test_start_all_starts_every_clock() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    run_clocks(&mut sw, &time, true, false);
    assert!(sw.running_clocks().is_empty());

    sw.start_all();
    assert_eq!(sw.running_clocks().len(), sw.available_clock_names().len());
}

#[test]
fn test_misuse_errors() {
    let (mut sw, _time) = manual_stopwatch(StopwatchConfig::default());

    assert_eq!(
        sw.stop(ClockRef::Default),
        Err(StopwatchError::NotStarted("default".into()))
    );
    sw.start(ClockRef::Default).unwrap();
    assert_eq!(
        sw.start(ClockRef::Default),
        Err(StopwatchError::AlreadyStarted("default".into()))
    );
    sw.pause(ClockRef::Default).unwrap();
    assert_eq!(
        sw.start(ClockRef::Default),
        Err(StopwatchError::InvalidState("default".into()))
    );
    assert_eq!(
        sw.pause(ClockRef::Default),
        Err(StopwatchError::AlreadyPaused("default".into()))
    );
    assert_eq!(sw.paused_clocks(), vec!["default"]);

    assert_eq!(
        sw.remove_clock("bogus").map(|c| c.state()),
        Err(StopwatchError::ClockNotFound("bogus".into()))
    );
    assert_eq!(
        sw.remove_clock("default").map(|c| c.state()),
        Err(StopwatchError::LastClockProtected("default".into()))
    );
}

#[test]
fn test_reset_and_reinitialize() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig {
        title: "Pipeline".to_string(),
        default_clock_name: "total".to_string(),
        default_clock_title: "Whole run".to_string(),
        ..Default::default()
    });
    sw.add_clock("fetch", "Fetch", true).unwrap();
    sw.add_clock("parse", "Parse", false).unwrap();
    sw.start_all();
    time.advance_secs(2.0);
    sw.stop_all();

    sw.reset("fetch").unwrap();
    let fetch = sw.clock("fetch").unwrap();
    assert_eq!(fetch.state(), ClockState::Idle);
    assert_eq!(fetch.accumulated_seconds(), 0.0);
    assert_eq!(fetch.completed_laps(), 0);
    assert!(!fetch.ever_used());

    sw.reinitialize();
    assert_eq!(sw.available_clock_names(), vec!["total"]);
    let total = sw.clock(ClockRef::Default).unwrap();
    assert_eq!(total.title(), "Whole run");
    assert_eq!(total.state(), ClockState::Idle);
    assert_eq!(
        sw.clock_summary(ClockRef::Default, ClockSummaryOptions::default())
            .unwrap(),
        "Whole run: never used."
    );
}

#[test]
fn test_summary_json() {
    let (mut sw, time) = manual_stopwatch(StopwatchConfig::default());
    sw.add_clock("h", "Hidden", false).unwrap();
    sw.start_all();
    time.advance_secs(90.0);
    sw.stop_all();

    let json = sw.summary(SummaryOptions::default()).to_value().unwrap();
    assert_eq!(json["title"], "StopWatch Default");
    assert_eq!(json["overall_seconds"], 90.0);
    assert_eq!(json["combined_seconds"], 180.0);
    assert_eq!(json["hidden"]["count"], 1);
    assert_eq!(json["clocks"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_config_from_json() {
    let config = StopwatchConfig::from_json(
        r#"{ "title": "Nightly", "record_lap_detail": true, "duplicate_policy": "replace" }"#,
    )
    .unwrap();
    let (mut sw, time) = manual_stopwatch(config);
    assert_eq!(sw.title(), "Nightly");
    assert_eq!(sw.default_clock_name(), "default");

    sw.add_clock("etl", "ETL", true).unwrap();
    sw.add_clock("etl", "ETL v2", true).unwrap();
    assert_eq!(sw.len(), 2);

    sw.start("etl").unwrap();
    time.advance_secs(0.25);
    sw.stop("etl").unwrap();
    assert_relative_eq!(sw.lap_detail("etl", 1).unwrap().total_seconds(), 0.25);
    let text = sw.summary(SummaryOptions::default()).to_string();
    assert!(text.contains("ETL v2: Duration: 0.25 seconds in 1 lap(s)"), "{text}");
}
