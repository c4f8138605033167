use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use sweepstake_core::Timestamp;
use sweepstake_ports::Clock;

/// Clock frozen at a chosen instant
///
/// Time only moves through [`FixedClock::advance`] or [`FixedClock::set`],
/// so orders submitted back to back share a timestamp unless the test moves
/// the clock between them.
pub struct FixedClock {
    current: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move time forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current += duration;
    }

    /// Jump to an explicit instant
    pub fn set(&self, time: Timestamp) {
        *self.current.lock() = time;
    }
}

impl Default for FixedClock {
    /// Starts at the Unix epoch
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
