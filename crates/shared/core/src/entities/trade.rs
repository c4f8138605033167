use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Side;
use crate::values::{InstrumentCode, ParticipantId, Price, Timestamp};

/// Unique identifier for a trade
pub type TradeId = Uuid;

/// Ownership transfer resulting from a cross
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub instrument: InstrumentCode,
    pub buyer: ParticipantId,
    pub seller: ParticipantId,
    /// Always the aggressor's submitted price
    pub price: Price,
    /// Side of the incoming order that triggered the cross
    pub aggressor: Side,
    pub timestamp: Timestamp,
}

impl Trade {
    /// Create a new trade with explicit timestamp
    pub fn new_with_time(
        instrument: InstrumentCode,
        buyer: ParticipantId,
        seller: ParticipantId,
        price: Price,
        aggressor: Side,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument,
            buyer,
            seller,
            price,
            aggressor,
            timestamp,
        }
    }
}
