use lapwatch_core::Timestamp;

/// Where clocks get the instant a transition happens at
///
/// Every start, stop, pause and unpause without an explicit instant reads
/// `now()` exactly once; bulk operations read it once for all clocks.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Label shown in `Debug` output of whatever holds the source
    fn name(&self) -> &str {
        "TimeSource"
    }
}
