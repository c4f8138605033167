//! Sweepstake Ports
//!
//! Port definitions (traits) for the sweepstake exchange.
//! These define the boundaries between the matching core and its collaborators.

mod clock;
mod error;
mod events;

pub use clock::Clock;
pub use error::{MatchingError, MatchingResult, RegistryError};
pub use events::{
    EventSink, ExchangeEvent, InstrumentDroppedEvent, OrderAcceptedEvent, OrderCanceledEvent,
    OwnerChangedEvent,
};
