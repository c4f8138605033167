//! Sweepstake Core Domain
//!
//! Pure domain types for the sweepstake ownership exchange.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Instrument, InstrumentUnavailable, Lifecycle, Order, Side, Trade, TradeId};
pub use values::{InstrumentCode, ParticipantId, Price, Timestamp};
