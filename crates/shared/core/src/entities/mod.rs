mod instrument;
mod order;
mod side;
mod trade;

pub use instrument::{Instrument, InstrumentUnavailable, Lifecycle};
pub use order::Order;
pub use side::Side;
pub use trade::{Trade, TradeId};
