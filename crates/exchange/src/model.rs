// Re-export domain types so callers only need this crate
pub use sweepstake_core::{
    Instrument, InstrumentCode, Lifecycle, Order, ParticipantId, Price, Side, Timestamp, Trade,
    TradeId,
};

pub use sweepstake_matching::{Submission, Withdrawal};

pub use sweepstake_ports::{
    Clock, EventSink, ExchangeEvent, InstrumentDroppedEvent, OrderAcceptedEvent,
    OrderCanceledEvent, OwnerChangedEvent,
};
