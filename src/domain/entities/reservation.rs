//! Reservation entity: a future-dated hold on equipment.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{DateRange, EquipmentId, MemberId, RentalId, ReservationId};

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Fulfilled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Fulfilled,
    ];

    /// Statuses that hold the equipment for the reserved period.
    pub const BLOCKING: [ReservationStatus; 2] = [Self::Pending, Self::Confirmed];

    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Fulfilled => "FULFILLED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::validation("status", format!("unknown reservation status '{s}'"))
            })
    }
}

/// A hold on equipment for a future period, later fulfilled into a rental.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: ReservationId,
    pub equipment_id: EquipmentId,
    pub member_id: MemberId,
    pub period: DateRange,
    pub status: ReservationStatus,
    pub rental_id: Option<RentalId>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for booking a reservation.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub equipment_id: EquipmentId,
    pub member_id: MemberId,
    pub period: DateRange,
    pub notes: Option<String>,
}

impl Reservation {
    /// Books a `PENDING` reservation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the period starts before `today`.
    pub fn create(
        new: NewReservation,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if new.period.start() < today {
            return Err(DomainError::validation(
                "start_date",
                format!("reservation cannot start in the past ({})", new.period.start()),
            ));
        }

        Ok(Self {
            id: ReservationId::new(),
            equipment_id: new.equipment_id,
            member_id: new.member_id,
            period: new.period,
            status: ReservationStatus::Pending,
            rental_id: None,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_blocking(&self) -> bool {
        self.status.is_blocking()
    }

    pub fn confirm(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            ReservationStatus::Pending => {
                self.status = ReservationStatus::Confirmed;
                self.updated_at = now;
                Ok(())
            }
            other => Err(self.transition_error(other, "confirm")),
        }
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            ReservationStatus::Pending | ReservationStatus::Confirmed => {
                self.status = ReservationStatus::Cancelled;
                self.updated_at = now;
                Ok(())
            }
            other => Err(self.transition_error(other, "cancel")),
        }
    }

    /// Checks that the reservation may be turned into a rental.
    pub fn ensure_fulfillable(&self) -> DomainResult<()> {
        match self.status {
            ReservationStatus::Confirmed => Ok(()),
            other => Err(self.transition_error(other, "fulfill")),
        }
    }

    /// Links the rental created from this reservation.
    pub fn fulfill(&mut self, rental_id: RentalId, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_fulfillable()?;
        self.status = ReservationStatus::Fulfilled;
        self.rental_id = Some(rental_id);
        self.updated_at = now;
        Ok(())
    }

    fn transition_error(&self, status: ReservationStatus, action: &'static str) -> DomainError {
        match status {
            ReservationStatus::Cancelled => DomainError::AlreadyCancelled {
                entity: "Reservation",
                id: self.id.to_string(),
            },
            other => DomainError::invalid_state("Reservation", self.id, other, action),
        }
    }
}
