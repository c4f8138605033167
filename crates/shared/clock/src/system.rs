use chrono::Utc;
use sweepstake_core::Timestamp;
use sweepstake_ports::Clock;

/// Wall-clock UTC time, used outside tests
///
/// Two submissions landing inside the clock's resolution share a
/// timestamp; the book's arrival sequence orders them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
