//! Ports for collaborators outside the domain.
//!
//! Repository ports live in [`crate::domain::repositories`].

pub mod clock;
pub mod event_publisher;
pub mod notification;
pub mod payment;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event_publisher::{EventHandler, EventPublisher};
pub use notification::{Notification, NotificationService};
pub use payment::{ChargeKind, PaymentReceipt, PaymentRequest, PaymentService};

#[cfg(test)]
pub use event_publisher::{MockEventHandler, MockEventPublisher};
#[cfg(test)]
pub use notification::MockNotificationService;
#[cfg(test)]
pub use payment::MockPaymentService;
