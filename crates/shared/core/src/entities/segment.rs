use super::ClockState;
use crate::error::TransitionError;
use crate::values::{Seconds, Timestamp, seconds_between};

/// Running/Paused/Stopped state machine shared by clocks and laps
///
/// Tracks the open segment (if any) and the seconds folded in from every
/// segment closed so far. Time only moves into `accumulated` when a running
/// segment closes, by either a stop or a pause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    state: ClockState,
    /// Present iff `state == Running`
    begin: Option<Timestamp>,
    accumulated: Seconds,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A segment already running since `at`
    pub fn started(at: Timestamp) -> Self {
        Self {
            state: ClockState::Running,
            begin: Some(at),
            accumulated: 0.0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Start of the open segment, if running
    pub fn begin(&self) -> Option<Timestamp> {
        self.begin
    }

    /// Seconds from closed segments only
    pub fn accumulated(&self) -> Seconds {
        self.accumulated
    }

    /// Accumulated seconds plus the open segment measured against `now`
    pub fn total_at(&self, now: Timestamp) -> Seconds {
        match self.begin {
            Some(begin) => self.accumulated + seconds_between(begin, now),
            None => self.accumulated,
        }
    }

    /// Open a new segment
    ///
    /// Legal from Idle or Stopped.
    pub fn start(&mut self, at: Timestamp) -> Result<(), TransitionError> {
        match self.state {
            ClockState::Idle | ClockState::Stopped => {
                self.begin = Some(at);
                self.state = ClockState::Running;
                Ok(())
            }
            ClockState::Running => Err(TransitionError::AlreadyRunning),
            ClockState::Paused => Err(TransitionError::StartWhilePaused),
        }
    }

    /// Close the segment and move to Stopped
    ///
    /// Returns the seconds this call added. Stopping from Paused adds nothing:
    /// the time up to the pause was folded in when the pause happened.
    pub fn stop(&mut self, at: Timestamp) -> Result<Seconds, TransitionError> {
        let added = match self.state {
            ClockState::Running => self.close(at),
            ClockState::Paused => 0.0,
            ClockState::Idle | ClockState::Stopped => return Err(TransitionError::NotStarted),
        };
        self.state = ClockState::Stopped;
        Ok(added)
    }

    /// Close the segment but keep the lap open
    pub fn pause(&mut self, at: Timestamp) -> Result<Seconds, TransitionError> {
        match self.state {
            ClockState::Running => {
                let added = self.close(at);
                self.state = ClockState::Paused;
                Ok(added)
            }
            ClockState::Paused => Err(TransitionError::AlreadyPaused),
            ClockState::Idle | ClockState::Stopped => Err(TransitionError::NotStarted),
        }
    }

    /// Open a fresh segment within the paused lap
    pub fn unpause(&mut self, at: Timestamp) -> Result<(), TransitionError> {
        match self.state {
            ClockState::Paused => {
                self.begin = Some(at);
                self.state = ClockState::Running;
                Ok(())
            }
            _ => Err(TransitionError::NotPaused),
        }
    }

    /// Back to Idle with nothing accumulated
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn close(&mut self, at: Timestamp) -> Seconds {
        let added = self
            .begin
            .take()
            .map(|begin| seconds_between(begin, at))
            .unwrap_or(0.0);
        self.accumulated += added;
        added
    }
}
