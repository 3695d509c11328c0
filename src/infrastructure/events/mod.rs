//! Event publisher implementations.

pub mod in_memory_event_bus;
pub mod recording_event_publisher;

pub use in_memory_event_bus::{InMemoryEventBus, Subscription};
pub use recording_event_publisher::RecordingEventPublisher;
