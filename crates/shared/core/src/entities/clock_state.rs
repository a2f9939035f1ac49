use serde::{Deserialize, Serialize};

/// Clock lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClockState {
    /// Never started, or freshly reset
    #[default]
    Idle,
    /// A segment is open and accumulating time
    Running,
    /// The lap is open but its segment is suspended
    Paused,
    /// Has run at least once and no segment is open
    Stopped,
}

impl ClockState {
    /// Returns true if a new lap may be started from this state
    pub fn can_start(&self) -> bool {
        matches!(self, ClockState::Idle | ClockState::Stopped)
    }

    /// Returns true if a lap is open (running or paused)
    pub fn is_lap_open(&self) -> bool {
        matches!(self, ClockState::Running | ClockState::Paused)
    }

    /// Returns true when neither running nor paused
    ///
    /// Idle counts as stopped: a clock that was never used is not running.
    pub fn is_stopped(&self) -> bool {
        !self.is_lap_open()
    }
}
