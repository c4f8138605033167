use chrono::{DateTime, Utc};

mod code;
mod participant;
mod price;

pub use code::InstrumentCode;
pub use participant::ParticipantId;
pub use price::Price;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
