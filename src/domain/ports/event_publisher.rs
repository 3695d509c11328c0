//! Event publication port.

use async_trait::async_trait;

use crate::domain::events::DomainEvent;

/// Publishes domain events to interested handlers.
///
/// Publication never fails from the caller's point of view: handler errors
/// are logged by the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: DomainEvent);
}

/// Reacts to published events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Name used in logs when the handler fails.
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()>;
}
