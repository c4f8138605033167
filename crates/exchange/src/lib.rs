//! Sweepstake Exchange
//!
//! One independent single-instrument exchange per tournament team, behind a
//! single [`Exchange`] value constructed at startup.
//!
//! ```ignore
//! use sweepstake_exchange::{Exchange, ExchangeConfig};
//! use sweepstake_core::Side;
//! use rust_decimal_macros::dec;
//!
//! let exchange = Exchange::from_config(ExchangeConfig::default())?;
//! exchange.set_owner("FRA", "alice")?;
//! exchange.submit_order(Side::Bid, "FRA", "bob", dec!(10.00))?;
//! let outcome = exchange.submit_order(Side::Ask, "FRA", "alice", dec!(9.50))?;
//! assert!(outcome.is_trade());
//! ```

// Application layer
pub mod exchange;

// Infrastructure layer
pub mod event_sink;
pub mod registry;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use config::{ConfigError, ExchangeConfig};
pub use error::{ErrorKind, ExchangeError, Result};
pub use event_sink::{MemoryEventSink, NullEventSink};
pub use exchange::Exchange;
pub use registry::InstrumentRegistry;
