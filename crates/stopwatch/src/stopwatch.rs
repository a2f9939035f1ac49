//! Clock registry
//!
//! A [`Stopwatch`] owns every clock it times, keyed by name in insertion
//! order. Callers never touch a [`Clock`] mutably: each operation resolves a
//! [`ClockRef`], delegates to the clock and propagates its error unchanged.
//!
//! Bulk operations read the time source once and hand the same instant to
//! every clock, so clocks started or stopped together agree exactly. Clocks
//! that are not in the right state for a bulk operation are skipped.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use lapwatch_core::{Clock, Lap, Seconds, StopwatchError, StopwatchResult, Timestamp};
use lapwatch_ports::TimeSource;
use lapwatch_time::SystemTimeSource;
use log::{debug, info, trace};

use crate::clock_ref::ClockRef;
use crate::config::{ClockSummaryOptions, DuplicatePolicy, StopwatchConfig, SummaryOptions};
use crate::summary::{self, SummaryReport};

/// Named clocks plus the aggregation over them
pub struct Stopwatch {
    config: StopwatchConfig,
    clocks: IndexMap<String, Clock>,
    time: Arc<dyn TimeSource>,
}

impl Stopwatch {
    /// Create a stopwatch with default configuration on the system clock
    pub fn new() -> Self {
        Self::with_config(StopwatchConfig::default())
    }

    /// Create with custom configuration on the system clock
    pub fn with_config(config: StopwatchConfig) -> Self {
        Self::with_time_source(config, Arc::new(SystemTimeSource::new()))
    }

    /// Create with custom configuration and time source
    pub fn with_time_source(config: StopwatchConfig, time: Arc<dyn TimeSource>) -> Self {
        let mut stopwatch = Self {
            config,
            clocks: IndexMap::new(),
            time,
        };
        let default_clock = stopwatch.new_clock(
            &stopwatch.config.default_clock_name,
            &stopwatch.config.default_clock_title,
            true,
        );
        stopwatch
            .clocks
            .insert(default_clock.name().to_string(), default_clock);
        stopwatch
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn config(&self) -> &StopwatchConfig {
        &self.config
    }

    pub fn default_clock_name(&self) -> &str {
        &self.config.default_clock_name
    }

    /// Current instant according to the configured time source
    pub fn now(&self) -> Timestamp {
        self.time.now()
    }

    /// Register a new idle clock
    pub fn add_clock(
        &mut self,
        name: impl Into<String>,
        title: impl Into<String>,
        visible: bool,
    ) -> StopwatchResult<()> {
        let name = name.into();
        let title = title.into();
        if self.clocks.contains_key(&name) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => return Err(StopwatchError::DuplicateClock(name)),
                DuplicatePolicy::Replace => debug!("Replacing clock '{}'", name),
            }
        }
        let clock = self.new_clock(&name, &title, visible);
        debug!(
            "Added clock '{}' ({}, {})",
            name,
            clock.title(),
            if visible { "visible" } else { "hidden" }
        );
        self.clocks.insert(name, clock);
        Ok(())
    }

    /// Unregister a clock, returning it
    ///
    /// The sole remaining clock can never be removed; use [`Self::reinitialize`]
    /// to return to a single fresh default clock instead.
    pub fn remove_clock(&mut self, name: &str) -> StopwatchResult<Clock> {
        if !self.clocks.contains_key(name) {
            return Err(StopwatchError::ClockNotFound(name.to_string()));
        }
        if self.clocks.len() == 1 {
            return Err(StopwatchError::LastClockProtected(name.to_string()));
        }
        let removed = self
            .clocks
            .shift_remove(name)
            .ok_or_else(|| StopwatchError::ClockNotFound(name.to_string()))?;
        debug!("Removed clock '{}'", name);
        Ok(removed)
    }

    /// Back to a single idle default clock
    pub fn reinitialize(&mut self) {
        let default_name = self.config.default_clock_name.clone();
        match self.clocks.get_mut(&default_name) {
            Some(clock) => clock.reset(),
            None => {
                let clock = self.new_clock(&default_name, &self.config.default_clock_title, true);
                self.clocks.insert(default_name.clone(), clock);
            }
        }
        let before = self.clocks.len();
        self.clocks.retain(|name, _| *name == default_name);
        info!(
            "Reinitialized stopwatch '{}' ({} clock(s) removed)",
            self.config.title,
            before - self.clocks.len()
        );
    }

    pub fn contains_clock(&self, name: &str) -> bool {
        self.clocks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }

    /// Read-only access to a clock
    pub fn clock<'a>(&self, clock: impl Into<ClockRef<'a>>) -> StopwatchResult<&Clock> {
        let name = clock.into().resolve(&self.config.default_clock_name);
        self.clocks
            .get(name)
            .ok_or_else(|| StopwatchError::ClockNotFound(name.to_string()))
    }

    /// All clocks in registration order
    pub fn clocks(&self) -> impl Iterator<Item = &Clock> {
        self.clocks.values()
    }

    pub fn start<'a>(&mut self, clock: impl Into<ClockRef<'a>>) -> StopwatchResult<()> {
        let now = self.now();
        self.start_at(clock, now)
    }

    pub fn start_at<'a>(
        &mut self,
        clock: impl Into<ClockRef<'a>>,
        at: Timestamp,
    ) -> StopwatchResult<()> {
        let clock = self.clock_mut(clock.into())?;
        clock.start(at)?;
        debug!("Clock '{}' started at {}", clock.name(), at);
        Ok(())
    }

    /// Stop a clock; returns the seconds the final segment added
    pub fn stop<'a>(&mut self, clock: impl Into<ClockRef<'a>>) -> StopwatchResult<Seconds> {
        let now = self.now();
        self.stop_at(clock, now)
    }

    pub fn stop_at<'a>(
        &mut self,
        clock: impl Into<ClockRef<'a>>,
        at: Timestamp,
    ) -> StopwatchResult<Seconds> {
        let clock = self.clock_mut(clock.into())?;
        let added = clock.stop(at)?;
        debug!(
            "Clock '{}' stopped at {} (+{:.6}s, lap {})",
            clock.name(),
            at,
            added,
            clock.completed_laps()
        );
        Ok(added)
    }

    /// Pause a clock; returns the seconds the closed segment added
    pub fn pause<'a>(&mut self, clock: impl Into<ClockRef<'a>>) -> StopwatchResult<Seconds> {
        let now = self.now();
        self.pause_at(clock, now)
    }

    pub fn pause_at<'a>(
        &mut self,
        clock: impl Into<ClockRef<'a>>,
        at: Timestamp,
    ) -> StopwatchResult<Seconds> {
        let clock = self.clock_mut(clock.into())?;
        let added = clock.pause(at)?;
        debug!("Clock '{}' paused at {} (+{:.6}s)", clock.name(), at, added);
        Ok(added)
    }

    pub fn unpause<'a>(&mut self, clock: impl Into<ClockRef<'a>>) -> StopwatchResult<()> {
        let now = self.now();
        self.unpause_at(clock, now)
    }

    pub fn unpause_at<'a>(
        &mut self,
        clock: impl Into<ClockRef<'a>>,
        at: Timestamp,
    ) -> StopwatchResult<()> {
        let clock = self.clock_mut(clock.into())?;
        clock.unpause(at)?;
        debug!("Clock '{}' unpaused at {}", clock.name(), at);
        Ok(())
    }

    /// Return a clock to idle as if never used
    pub fn reset<'a>(&mut self, clock: impl Into<ClockRef<'a>>) -> StopwatchResult<()> {
        let clock = self.clock_mut(clock.into())?;
        clock.reset();
        debug!("Clock '{}' reset", clock.name());
        Ok(())
    }

    /// Start every idle or stopped clock at one shared instant
    ///
    /// Returns the number of clocks started.
    pub fn start_all(&mut self) -> usize {
        let now = self.now();
        self.start_all_at(now)
    }

    pub fn start_all_at(&mut self, at: Timestamp) -> usize {
        self.for_each_eligible(
            "start",
            |clock| clock.state().can_start(),
            |clock| clock.start(at),
        )
    }

    /// Stop every running clock at one shared instant
    ///
    /// Idle, stopped and paused clocks are skipped. Returns the number of
    /// clocks stopped.
    pub fn stop_all(&mut self) -> usize {
        let now = self.now();
        self.stop_all_at(now)
    }

    pub fn stop_all_at(&mut self, at: Timestamp) -> usize {
        self.for_each_eligible("stop", Clock::is_running, |clock| {
            clock.stop(at).map(|_| ())
        })
    }

    /// Pause every running clock at one shared instant
    pub fn pause_all(&mut self) -> usize {
        let now = self.now();
        self.pause_all_at(now)
    }

    pub fn pause_all_at(&mut self, at: Timestamp) -> usize {
        self.for_each_eligible("pause", Clock::is_running, |clock| {
            clock.pause(at).map(|_| ())
        })
    }

    /// Unpause every paused clock at one shared instant
    pub fn unpause_all(&mut self) -> usize {
        let now = self.now();
        self.unpause_all_at(now)
    }

    pub fn unpause_all_at(&mut self, at: Timestamp) -> usize {
        self.for_each_eligible("unpause", Clock::is_paused, |clock| clock.unpause(at))
    }

    /// Reset every clock
    pub fn reset_all(&mut self) {
        for clock in self.clocks.values_mut() {
            clock.reset();
        }
        debug!("Reset all {} clock(s)", self.clocks.len());
    }

    pub fn running_clocks(&self) -> Vec<&str> {
        self.names_where(Clock::is_running)
    }

    /// Clocks neither running nor paused, including never-used ones
    pub fn stopped_clocks(&self) -> Vec<&str> {
        self.names_where(Clock::is_stopped)
    }

    pub fn paused_clocks(&self) -> Vec<&str> {
        self.names_where(Clock::is_paused)
    }

    pub fn ever_used_clocks(&self) -> Vec<&str> {
        self.names_where(Clock::ever_used)
    }

    pub fn available_clock_names(&self) -> Vec<&str> {
        self.clocks.keys().map(String::as_str).collect()
    }

    /// Total seconds including a running segment, measured now
    pub fn clock_total_seconds<'a>(
        &self,
        clock: impl Into<ClockRef<'a>>,
    ) -> StopwatchResult<Seconds> {
        let now = self.now();
        Ok(self.clock(clock)?.current_total_seconds(now))
    }

    /// Completed laps plus one if running
    pub fn clock_lap_count<'a>(&self, clock: impl Into<ClockRef<'a>>) -> StopwatchResult<u32> {
        Ok(self.clock(clock)?.current_lap_count())
    }

    /// Lap `number` (1-based) of a clock recording lap detail
    pub fn lap_detail<'a>(
        &self,
        clock: impl Into<ClockRef<'a>>,
        number: usize,
    ) -> StopwatchResult<&Lap> {
        self.clock(clock)?.lap_detail(number)
    }

    pub fn has_lap_detail<'a>(&self, clock: impl Into<ClockRef<'a>>) -> StopwatchResult<bool> {
        Ok(self.clock(clock)?.has_lap_detail())
    }

    /// One clock's title, duration and lap count
    ///
    /// A never-used clock reports a neutral message; a clock with an open lap
    /// fails with `NotYetStopped`.
    pub fn clock_summary<'a>(
        &self,
        clock: impl Into<ClockRef<'a>>,
        options: ClockSummaryOptions,
    ) -> StopwatchResult<String> {
        summary::clock_summary(self.clock(clock)?, options)
    }

    /// Whole-stopwatch report with visible/hidden partitioning
    pub fn summary(&self, options: SummaryOptions) -> SummaryReport {
        SummaryReport::build(
            &self.config.title,
            &self.config.default_clock_name,
            self.clocks.values(),
            self.now(),
            options,
        )
    }

    fn new_clock(&self, name: &str, title: &str, visible: bool) -> Clock {
        Clock::new(name, title, visible).with_lap_detail(self.config.record_lap_detail)
    }

    fn clock_mut(&mut self, clock: ClockRef<'_>) -> StopwatchResult<&mut Clock> {
        let name = clock.resolve(&self.config.default_clock_name);
        self.clocks
            .get_mut(name)
            .ok_or_else(|| StopwatchError::ClockNotFound(name.to_string()))
    }

    fn names_where(&self, predicate: impl Fn(&Clock) -> bool) -> Vec<&str> {
        self.clocks
            .iter()
            .filter(|(_, clock)| predicate(clock))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Apply `op` to every clock passing `eligible`, skipping the rest
    fn for_each_eligible(
        &mut self,
        action: &str,
        eligible: impl Fn(&Clock) -> bool,
        mut op: impl FnMut(&mut Clock) -> StopwatchResult<()>,
    ) -> usize {
        let mut applied = 0;
        for clock in self.clocks.values_mut() {
            if !eligible(clock) {
                trace!(
                    "{} all: skipping clock '{}' ({:?})",
                    action,
                    clock.name(),
                    clock.state()
                );
                continue;
            }
            match op(clock) {
                Ok(()) => applied += 1,
                // Unreachable while `eligible` matches the transition's legal states
                Err(e) => trace!("{} all: skipping clock '{}': {}", action, clock.name(), e),
            }
        }
        debug!("{} all: {} clock(s)", action, applied);
        applied
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("config", &self.config)
            .field("clocks", &self.clocks)
            .field("time", &self.time.name())
            .finish()
    }
}
