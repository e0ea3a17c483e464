// src/infrastructure/events.rs
use crate::ports::{DomainEvent, EventSink};

/// Writes every domain event to the `tracing` pipeline.
#[derive(Default, Clone)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn notify(&self, event: &DomainEvent) {
        tracing::info!(event = event.name(), details = ?event, "domain event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::ArticleId;
    use chrono::Utc;

    #[test]
    fn event_names_are_stable() {
        let event = DomainEvent::ArticlePublished {
            id: ArticleId(1),
            at: Utc::now(),
        };
        assert_eq!(event.name(), "article.published");
        TracingEventSink.notify(&event);
    }
}
