//! Domain event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receives domain events emitted by the state stores.
///
/// `emit()` must stay fast and non-blocking; implementations queue for async
/// processing, and an emit failure must never affect the mutation that
/// produced the event.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Discards all events; used where nothing subscribes.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Test sink collecting emitted events in order.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_sink_collects_in_order() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        sink.emit(DomainEvent::CurrencyChanged {
            currency: "EUR".to_string(),
        });
        sink.emit(DomainEvent::OrderPlaced {
            order_id: "ord-1".to_string(),
        });

        assert_eq!(sink.len(), 2);
        assert!(matches!(
            sink.events()[0],
            DomainEvent::CurrencyChanged { .. }
        ));

        sink.clear();
        assert!(sink.is_empty());
    }
}
