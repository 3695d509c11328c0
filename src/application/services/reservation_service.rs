//! Reservation booking, confirmation, cancellation and fulfilment.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::{AvailabilityService, RentalService};
use crate::domain::entities::{NewReservation, Rental, Reservation};
use crate::domain::errors::DomainError;
use crate::domain::events::DomainEvent;
use crate::domain::ports::{Clock, EventPublisher};
use crate::domain::repositories::{
    EquipmentRepository, MemberRepository, ReservationFilter, ReservationRepository,
};
use crate::domain::services::Exclusions;
use crate::domain::value_objects::ReservationId;
use crate::error::AppError;

pub struct ReservationService {
    reservations: Arc<dyn ReservationRepository>,
    equipment: Arc<dyn EquipmentRepository>,
    members: Arc<dyn MemberRepository>,
    availability: Arc<AvailabilityService>,
    rentals: Arc<RentalService>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ReservationService {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        equipment: Arc<dyn EquipmentRepository>,
        members: Arc<dyn MemberRepository>,
        availability: Arc<AvailabilityService>,
        rentals: Arc<RentalService>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reservations,
            equipment,
            members,
            availability,
            rentals,
            events,
            clock,
        }
    }

    /// Books a `PENDING` reservation.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown member or equipment
    /// - `RENTAL_NOT_ALLOWED` for an inactive member, a period longer than
    ///   the tier allows or an unrentable item
    /// - [`AppError::Validation`] when the period starts in the past
    /// - `EQUIPMENT_UNAVAILABLE` when the period overlaps another booking
    pub async fn create(&self, new: NewReservation) -> Result<Reservation, AppError> {
        let now = self.clock.now();

        let member = self
            .members
            .find_by_id(new.member_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Member not found", json!({ "member_id": new.member_id }))
            })?;
        if !member.is_active {
            return Err(DomainError::not_allowed(format!("member {} is deactivated", member.id)).into());
        }
        member.ensure_rental_length(&new.period)?;

        let equipment = self
            .equipment
            .find_by_id(new.equipment_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Equipment not found",
                    json!({ "equipment_id": new.equipment_id }),
                )
            })?;
        equipment.ensure_bookable()?;

        let reservation = Reservation::create(new, self.clock.today(), now)?;
        self.availability
            .ensure_available(reservation.equipment_id, &reservation.period, Exclusions::none())
            .await?;
        self.reservations.save(&reservation).await?;

        tracing::info!(
            reservation_id = %reservation.id,
            equipment_id = %reservation.equipment_id,
            member_id = %reservation.member_id,
            "Reservation created"
        );
        self.events
            .publish(DomainEvent::ReservationCreated {
                reservation_id: reservation.id,
                member_id: reservation.member_id,
                occurred_at: now,
            })
            .await;

        Ok(reservation)
    }

    pub async fn get(&self, id: ReservationId) -> Result<Reservation, AppError> {
        self.reservations.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found("Reservation not found", json!({ "reservation_id": id }))
        })
    }

    pub async fn list(
        &self,
        filter: &ReservationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Reservation>, i64), AppError> {
        let reservations = self.reservations.list(filter, offset, limit).await?;
        let total = self.reservations.count(filter).await?;
        Ok((reservations, total))
    }

    pub async fn confirm(&self, id: ReservationId) -> Result<Reservation, AppError> {
        let now = self.clock.now();
        let mut reservation = self.get(id).await?;
        reservation.confirm(now)?;
        self.reservations.save(&reservation).await?;

        tracing::info!(reservation_id = %id, "Reservation confirmed");
        self.events
            .publish(DomainEvent::ReservationConfirmed {
                reservation_id: id,
                member_id: reservation.member_id,
                occurred_at: now,
            })
            .await;

        Ok(reservation)
    }

    pub async fn cancel(&self, id: ReservationId) -> Result<Reservation, AppError> {
        let now = self.clock.now();
        let mut reservation = self.get(id).await?;
        reservation.cancel(now)?;
        self.reservations.save(&reservation).await?;

        tracing::info!(reservation_id = %id, "Reservation cancelled");
        self.events
            .publish(DomainEvent::ReservationCancelled {
                reservation_id: id,
                member_id: reservation.member_id,
                occurred_at: now,
            })
            .await;

        Ok(reservation)
    }

    /// Turns a `CONFIRMED` reservation into a rental for the same period.
    ///
    /// The checkout rules of [`RentalService::checkout`] apply; the
    /// reservation does not block its own rental.
    pub async fn fulfill(&self, id: ReservationId) -> Result<(Reservation, Rental), AppError> {
        let mut reservation = self.get(id).await?;
        reservation.ensure_fulfillable()?;

        let rental = self.rentals.checkout_reservation(&reservation).await?;

        let now = self.clock.now();
        reservation.fulfill(rental.id, now)?;
        self.reservations.save(&reservation).await?;

        tracing::info!(reservation_id = %id, rental_id = %rental.id, "Reservation fulfilled");
        self.events
            .publish(DomainEvent::ReservationFulfilled {
                reservation_id: id,
                rental_id: rental.id,
                member_id: reservation.member_id,
                occurred_at: now,
            })
            .await;

        Ok((reservation, rental))
    }
}
