//! Subscribers for domain events.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::events::{DomainEvent, EventKind};
use crate::domain::ports::{EventHandler, Notification, NotificationService};

/// Events that produce a member notification.
pub const NOTIFIED_EVENTS: [EventKind; 7] = [
    EventKind::RentalCreated,
    EventKind::RentalReturned,
    EventKind::RentalOverdue,
    EventKind::DamageAssessed,
    EventKind::ReservationConfirmed,
    EventKind::ReservationCancelled,
    EventKind::ReservationFulfilled,
];

/// Turns member-facing events into notifications.
pub struct NotificationEventHandler {
    notifier: Arc<dyn NotificationService>,
}

impl NotificationEventHandler {
    pub fn new(notifier: Arc<dyn NotificationService>) -> Self {
        Self { notifier }
    }

    fn compose(event: &DomainEvent) -> Option<(String, String)> {
        let message = match event {
            DomainEvent::RentalCreated {
                rental_id,
                start,
                end,
                total_cost,
                ..
            } => (
                "Rental confirmed".to_string(),
                format!("Rental {rental_id} runs from {start} to {end}. Total charged: {total_cost}."),
            ),
            DomainEvent::RentalReturned {
                rental_id,
                late_fee,
                damage_fee,
                ..
            } => (
                "Equipment returned".to_string(),
                format!(
                    "Rental {rental_id} is closed. Late fee: {late_fee}. Damage fee: {damage_fee}."
                ),
            ),
            DomainEvent::RentalOverdue {
                rental_id,
                days_overdue,
                ..
            } => (
                "Rental overdue".to_string(),
                format!("Rental {rental_id} is {days_overdue} day(s) overdue. Please return the equipment."),
            ),
            DomainEvent::DamageAssessed {
                rental_id,
                damage_fee,
                ..
            } => (
                "Damage assessed".to_string(),
                format!("Returned equipment for rental {rental_id} was damaged. Fee: {damage_fee}."),
            ),
            DomainEvent::ReservationConfirmed { reservation_id, .. } => (
                "Reservation confirmed".to_string(),
                format!("Reservation {reservation_id} is confirmed."),
            ),
            DomainEvent::ReservationCancelled { reservation_id, .. } => (
                "Reservation cancelled".to_string(),
                format!("Reservation {reservation_id} was cancelled."),
            ),
            DomainEvent::ReservationFulfilled {
                reservation_id,
                rental_id,
                ..
            } => (
                "Reservation picked up".to_string(),
                format!("Reservation {reservation_id} became rental {rental_id}."),
            ),
            _ => return None,
        };
        Some(message)
    }
}

#[async_trait]
impl EventHandler for NotificationEventHandler {
    fn name(&self) -> &'static str {
        "notification"
    }

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
        let (Some(member_id), Some((subject, body))) = (event.member_id(), Self::compose(event))
        else {
            return Ok(());
        };

        self.notifier
            .send(Notification {
                member_id,
                subject,
                body,
            })
            .await?;
        Ok(())
    }
}
