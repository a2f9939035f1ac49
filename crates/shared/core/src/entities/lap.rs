use super::{ClockState, Segment};
use crate::values::{Seconds, Timestamp};

/// One start→stop cycle of a clock, recorded when lap detail is enabled
#[derive(Debug, Clone, PartialEq)]
pub struct Lap {
    /// 1-based position in the clock's lap history
    number: usize,
    segment: Segment,
}

impl Lap {
    /// Begin lap `number` at `at`
    pub(crate) fn begin(number: usize, at: Timestamp) -> Self {
        Self {
            number,
            segment: Segment::started(at),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn state(&self) -> ClockState {
        self.segment.state()
    }

    /// Seconds this lap has run, counting only closed segments
    pub fn total_seconds(&self) -> Seconds {
        self.segment.accumulated()
    }

    /// Seconds this lap has run, including an open segment measured at `now`
    pub fn total_seconds_at(&self, now: Timestamp) -> Seconds {
        self.segment.total_at(now)
    }

    pub fn is_paused(&self) -> bool {
        self.segment.state() == ClockState::Paused
    }

    /// True once the owning clock has stopped this lap
    pub fn is_finished(&self) -> bool {
        self.segment.state() == ClockState::Stopped
    }

    pub(crate) fn segment_mut(&mut self) -> &mut Segment {
        &mut self.segment
    }
}
