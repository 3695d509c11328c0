//! In-process event bus with per-kind handler registries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::events::{DomainEvent, EventKind};
use crate::domain::ports::{EventHandler, EventPublisher};

/// Handle returned by [`InMemoryEventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    kind: EventKind,
    id: u64,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

type Registry = HashMap<EventKind, Vec<(u64, Arc<dyn EventHandler>)>>;

/// Dispatches each event to the handlers subscribed to its kind, in
/// subscription order.
///
/// Handlers run inline. A failing handler is logged and skipped; it never
/// fails the publisher or stops the remaining handlers.
#[derive(Default)]
pub struct InMemoryEventBus {
    handlers: RwLock<Registry>,
    next_id: AtomicU64,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: EventKind, handler: Arc<dyn EventHandler>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push((id, handler));
        Subscription { kind, id }
    }

    pub fn subscribe_all(
        &self,
        kinds: &[EventKind],
        handler: Arc<dyn EventHandler>,
    ) -> Vec<Subscription> {
        kinds
            .iter()
            .map(|kind| self.subscribe(*kind, handler.clone()))
            .collect()
    }

    /// Removes a subscription. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(list) = handlers.get_mut(&subscription.kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != subscription.id);
        before != list.len()
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map_or(0, Vec::len)
    }

    fn snapshot(&self, kind: EventKind) -> Vec<Arc<dyn EventHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: DomainEvent) {
        let event_type = event.event_type();
        metrics::counter!("domain_events_published_total", "type" => event_type).increment(1);

        for handler in self.snapshot(event.kind()) {
            if let Err(e) = handler.handle(&event).await {
                metrics::counter!("domain_event_handler_failures_total", "handler" => handler.name())
                    .increment(1);
                tracing::warn!(handler = handler.name(), event = event_type, error = %e, "Event handler failed");
            }
        }
    }
}
