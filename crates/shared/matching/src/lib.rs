//! Sweepstake Matching
//!
//! Per-instrument order book and the crossing engine that turns a compatible
//! bid/ask pair into an ownership transfer.
//!
//! One resting order per participant per side, strict price-time priority,
//! and every trade priced at the incoming (aggressor) order's price.

mod engine;
mod order_book;
mod price_time;
mod sorted_book;

pub use engine::{MatchingEngine, Submission, Withdrawal};
pub use order_book::OrderBook;
pub use price_time::{Priority, ask_priority, bid_priority, priority_for};
pub use sorted_book::SortedBook;

// Re-export the error types from ports for convenience
pub use sweepstake_ports::{MatchingError, MatchingResult, RegistryError};
