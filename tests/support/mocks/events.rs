// tests/support/mocks/events.rs
use pressroom_core::ports::{DomainEvent, EventSink};
use std::sync::{Arc, Mutex};

/// Records every notified event so tests can assert on them.
#[derive(Clone, Default)]
pub struct CapturingEventSink {
    pub events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl CapturingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Vec<DomainEvent> {
        self.events.lock().expect("mutex poisoned").clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.captured().iter().map(DomainEvent::name).collect()
    }
}

impl EventSink for CapturingEventSink {
    fn notify(&self, event: &DomainEvent) {
        self.events
            .lock()
            .expect("mutex poisoned")
            .push(event.clone());
    }
}
