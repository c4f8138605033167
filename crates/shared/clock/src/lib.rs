//! Sweepstake Clocks
//!
//! - [`SystemClock`]: wall-clock time for production
//! - [`FixedClock`]: frozen time that only moves when told to, for tests
//!
//! ```ignore
//! use sweepstake_clock::FixedClock;
//! use chrono::Duration;
//!
//! let clock = FixedClock::default();
//! let t0 = clock.now();
//! clock.advance(Duration::seconds(1));
//! assert!(clock.now() > t0);
//! ```

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use sweepstake_ports::Clock;
