use super::{ClockState, Lap, Segment};
use crate::error::{StopwatchError, StopwatchResult, TransitionError};
use crate::values::{Seconds, Timestamp};

/// One independently timed counter
///
/// Every transition takes the instant it happens at; the caller decides
/// whether that is "now" or an explicit override.
#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    /// Registry key, used to name the clock in errors
    name: String,
    title: String,
    /// Whether this clock shows up in default summaries
    visible: bool,
    segment: Segment,
    /// Completed start→stop cycles
    laps: u32,
    /// `Some` only when lap detail was requested at creation
    lap_history: Option<Vec<Lap>>,
}

impl Clock {
    /// Create an idle clock
    pub fn new(name: impl Into<String>, title: impl Into<String>, visible: bool) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            visible,
            segment: Segment::new(),
            laps: 0,
            lap_history: None,
        }
    }

    /// Record a [`Lap`] for every start→stop cycle
    pub fn with_lap_detail(mut self, enabled: bool) -> Self {
        self.lap_history = enabled.then(Vec::new);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> ClockState {
        self.segment.state()
    }

    /// Start of the open segment, if running
    pub fn begin(&self) -> Option<Timestamp> {
        self.segment.begin()
    }

    /// Seconds from closed segments, as of the last stop or pause
    pub fn accumulated_seconds(&self) -> Seconds {
        self.segment.accumulated()
    }

    /// Completed laps, not counting one in progress
    pub fn completed_laps(&self) -> u32 {
        self.laps
    }

    pub fn start(&mut self, at: Timestamp) -> StopwatchResult<()> {
        self.segment.start(at).map_err(|e| e.for_clock(&self.name))?;
        if let Some(history) = self.lap_history.as_mut() {
            let number = history.len() + 1;
            history.push(Lap::begin(number, at));
        }
        Ok(())
    }

    /// Close the lap; returns the seconds added to the total
    pub fn stop(&mut self, at: Timestamp) -> StopwatchResult<Seconds> {
        let added = self.segment.stop(at).map_err(|e| e.for_clock(&self.name))?;
        self.laps += 1;
        self.with_open_lap(|lap| lap.stop(at).map(|_| ()))?;
        Ok(added)
    }

    /// Suspend the running segment; returns the seconds added to the total
    pub fn pause(&mut self, at: Timestamp) -> StopwatchResult<Seconds> {
        let added = self.segment.pause(at).map_err(|e| e.for_clock(&self.name))?;
        self.with_open_lap(|lap| lap.pause(at).map(|_| ()))?;
        Ok(added)
    }

    pub fn unpause(&mut self, at: Timestamp) -> StopwatchResult<()> {
        self.segment.unpause(at).map_err(|e| e.for_clock(&self.name))?;
        self.with_open_lap(|lap| lap.unpause(at))
    }

    /// Back to Idle, keeping title and visibility
    pub fn reset(&mut self) {
        self.segment.reset();
        self.laps = 0;
        if let Some(history) = self.lap_history.as_mut() {
            history.clear();
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state() == ClockState::Paused
    }

    /// True whenever not running and not paused, including never used
    pub fn is_stopped(&self) -> bool {
        self.state().is_stopped()
    }

    /// True if a lap has completed or one is open
    pub fn ever_used(&self) -> bool {
        self.laps > 0 || self.state().is_lap_open()
    }

    /// Total seconds including the open segment measured against `now`
    pub fn current_total_seconds(&self, now: Timestamp) -> Seconds {
        self.segment.total_at(now)
    }

    /// Completed laps plus one if a lap is currently running
    pub fn current_lap_count(&self) -> u32 {
        if self.is_running() {
            self.laps + 1
        } else {
            self.laps
        }
    }

    pub fn has_lap_detail(&self) -> bool {
        self.lap_history.is_some()
    }

    /// Recorded laps, oldest first; `None` when lap detail is disabled
    pub fn laps(&self) -> Option<&[Lap]> {
        self.lap_history.as_deref()
    }

    /// Lap `number`, counting from 1
    pub fn lap_detail(&self, number: usize) -> StopwatchResult<&Lap> {
        let history = self
            .lap_history
            .as_ref()
            .ok_or_else(|| StopwatchError::LapDetailDisabled(self.name.clone()))?;
        number
            .checked_sub(1)
            .and_then(|idx| history.get(idx))
            .ok_or_else(|| StopwatchError::LapNotFound {
                clock: self.name.clone(),
                lap: number,
                recorded: history.len(),
            })
    }

    /// Apply a transition to the lap in progress, if laps are recorded
    fn with_open_lap(
        &mut self,
        f: impl FnOnce(&mut Segment) -> Result<(), TransitionError>,
    ) -> StopwatchResult<()> {
        let Some(lap) = self.lap_history.as_mut().and_then(|h| h.last_mut()) else {
            return Ok(());
        };
        f(lap.segment_mut()).map_err(|e| e.for_clock(&self.name))
    }
}
