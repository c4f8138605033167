use serde::{Deserialize, Serialize};
use sweepstake_core::{InstrumentCode, Order, ParticipantId, Timestamp, Trade};

/// Events emitted by the exchange once an operation has committed
///
/// Persistence and notification collaborators subscribe to these; the
/// engine itself never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "camelCase")]
pub enum ExchangeEvent {
    /// Order was inserted or amended and is resting
    OrderAccepted(OrderAcceptedEvent),
    /// Resting order was removed by its owner
    OrderCanceled(OrderCanceledEvent),
    /// A cross transferred ownership
    TradeExecuted(Trade),
    /// Ownership changed, by trade or by administrative assignment
    OwnerChanged(OwnerChangedEvent),
    /// Instrument was withdrawn
    InstrumentDropped(InstrumentDroppedEvent),
}

impl ExchangeEvent {
    pub fn instrument(&self) -> &InstrumentCode {
        match self {
            ExchangeEvent::OrderAccepted(e) => &e.order.instrument,
            ExchangeEvent::OrderCanceled(e) => &e.order.instrument,
            ExchangeEvent::TradeExecuted(t) => &t.instrument,
            ExchangeEvent::OwnerChanged(e) => &e.instrument,
            ExchangeEvent::InstrumentDropped(e) => &e.instrument,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAcceptedEvent {
    pub order: Order,
    pub amended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCanceledEvent {
    pub order: Order,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerChangedEvent {
    pub instrument: InstrumentCode,
    pub previous: Option<ParticipantId>,
    pub owner: ParticipantId,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentDroppedEvent {
    pub instrument: InstrumentCode,
    pub previous_owner: Option<ParticipantId>,
    pub cleared_orders: usize,
    pub timestamp: Timestamp,
}

/// Synchronous sink for exchange events
///
/// Called after the per-instrument lock has been released, never while
/// the book is being mutated.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: ExchangeEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_event_is_tagged_on_the_wire() {
        let event = ExchangeEvent::OwnerChanged(OwnerChangedEvent {
            instrument: InstrumentCode::new("FRA").unwrap(),
            previous: None,
            owner: ParticipantId::new("alice").unwrap(),
            timestamp: Utc::now(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "ownerChanged");
        assert_eq!(json["instrument"], "FRA");
        assert_eq!(json["owner"], "alice");
        assert_eq!(event.instrument().as_str(), "FRA");
    }
}
