use thiserror::Error;

/// Errors raised by clock transitions and registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StopwatchError {
    #[error("Clock '{0}' is already started")]
    AlreadyStarted(String),

    #[error("Clock '{0}' is paused; unpause it before starting")]
    InvalidState(String),

    #[error("Clock '{0}' is not started; it must be started first")]
    NotStarted(String),

    #[error("Clock '{0}' is already paused; it must be unpaused first")]
    AlreadyPaused(String),

    #[error("Clock '{0}' is not paused")]
    NotPaused(String),

    #[error("Clock '{0}' does not exist")]
    ClockNotFound(String),

    #[error("Clock '{0}' already exists")]
    DuplicateClock(String),

    #[error("Clock '{0}' is the last remaining clock and cannot be removed")]
    LastClockProtected(String),

    #[error("Clock '{0}' must be stopped before a duration can be reported")]
    NotYetStopped(String),

    #[error("Clock '{0}' does not record lap detail")]
    LapDetailDisabled(String),

    #[error("Clock '{clock}' has no lap {lap} (laps recorded: {recorded})")]
    LapNotFound {
        clock: String,
        lap: usize,
        recorded: usize,
    },
}

pub type StopwatchResult<T> = std::result::Result<T, StopwatchError>;

/// Illegal move of the segment state machine
///
/// The machine has no name of its own; the owning clock attaches one with
/// [`TransitionError::for_clock`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("already running")]
    AlreadyRunning,

    #[error("start while paused")]
    StartWhilePaused,

    #[error("not started")]
    NotStarted,

    #[error("already paused")]
    AlreadyPaused,

    #[error("not paused")]
    NotPaused,
}

impl TransitionError {
    /// Attach the clock name, yielding the public error kind
    pub fn for_clock(self, clock: &str) -> StopwatchError {
        let clock = clock.to_string();
        match self {
            TransitionError::AlreadyRunning => StopwatchError::AlreadyStarted(clock),
            TransitionError::StartWhilePaused => StopwatchError::InvalidState(clock),
            TransitionError::NotStarted => StopwatchError::NotStarted(clock),
            TransitionError::AlreadyPaused => StopwatchError::AlreadyPaused(clock),
            TransitionError::NotPaused => StopwatchError::NotPaused(clock),
        }
    }
}
