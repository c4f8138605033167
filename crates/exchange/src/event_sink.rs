use parking_lot::Mutex;
use sweepstake_ports::{EventSink, ExchangeEvent};

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: ExchangeEvent) {}
}

/// Keeps every published event in memory, in publication order
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<ExchangeEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ExchangeEvent> {
        self.events.lock().clone()
    }

    /// Take everything recorded so far
    pub fn drain(&self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for MemoryEventSink {
    fn publish(&self, event: ExchangeEvent) {
        self.events.lock().push(event);
    }
}
