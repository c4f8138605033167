use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{InstrumentCode, ParticipantId, Price, Timestamp};

/// A priced intent to acquire (bid) or relinquish (ask) an instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub instrument: InstrumentCode,
    pub participant: ParticipantId,
    pub side: Side,
    pub price: Price,
    pub submitted_at: Timestamp,
    /// Arrival sequence within the book, assigned on insert.
    /// Breaks ties between equal price and equal submission time.
    pub sequence: u64,
}

impl Order {
    /// Create a new order with explicit timestamp
    pub fn new(
        side: Side,
        instrument: InstrumentCode,
        participant: ParticipantId,
        price: Price,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            instrument,
            participant,
            side,
            price,
            submitted_at,
            sequence: 0,
        }
    }

    pub fn bid(
        instrument: InstrumentCode,
        participant: ParticipantId,
        price: Price,
        submitted_at: Timestamp,
    ) -> Self {
        Self::new(Side::Bid, instrument, participant, price, submitted_at)
    }

    pub fn ask(
        instrument: InstrumentCode,
        participant: ParticipantId,
        price: Price,
        submitted_at: Timestamp,
    ) -> Self {
        Self::new(Side::Ask, instrument, participant, price, submitted_at)
    }

    /// Whether this order, arriving now, is priced to trade with `resting`
    ///
    /// A bid crosses an ask priced at or below it; an ask crosses a bid
    /// priced at or above it. Orders on the same side never cross.
    pub fn crosses(&self, resting: &Order) -> bool {
        match (self.side, resting.side) {
            (Side::Bid, Side::Ask) => self.price >= resting.price,
            (Side::Ask, Side::Bid) => self.price <= resting.price,
            _ => false,
        }
    }
}
