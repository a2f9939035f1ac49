mod clock;
mod clock_state;
mod lap;
mod segment;

pub use clock::Clock;
pub use clock_state::ClockState;
pub use lap::Lap;
pub use segment::Segment;
