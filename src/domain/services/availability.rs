//! Date-overlap availability check.
//!
//! Equipment is free for a period when no blocking rental or reservation for
//! it overlaps the period. Intervals are closed, so a record ending on the
//! day another starts is a conflict.

use crate::domain::entities::{Rental, Reservation};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{DateRange, EquipmentId, RentalId, ReservationId};

/// Records left out of the check, e.g. the rental being extended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exclusions {
    pub rental: Option<RentalId>,
    pub reservation: Option<ReservationId>,
}

impl Exclusions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn rental(id: RentalId) -> Self {
        Self {
            rental: Some(id),
            reservation: None,
        }
    }

    pub fn reservation(id: ReservationId) -> Self {
        Self {
            rental: None,
            reservation: Some(id),
        }
    }
}

/// The first blocking record found for a period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conflict<'a> {
    Rental(&'a Rental),
    Reservation(&'a Reservation),
}

impl Conflict<'_> {
    pub fn period(&self) -> &DateRange {
        match self {
            Self::Rental(rental) => &rental.period,
            Self::Reservation(reservation) => &reservation.period,
        }
    }
}

/// Finds a blocking record overlapping `period`.
///
/// Callers pass the records of a single piece of equipment; entries for
/// other equipment are ignored anyway.
pub fn find_conflict<'a>(
    equipment_id: EquipmentId,
    period: &DateRange,
    rentals: &'a [Rental],
    reservations: &'a [Reservation],
    exclusions: Exclusions,
) -> Option<Conflict<'a>> {
    let rental = rentals
        .iter()
        .filter(|r| r.equipment_id == equipment_id)
        .filter(|r| Some(r.id) != exclusions.rental)
        .find(|r| r.status.is_blocking() && r.period.overlaps(period))
        .map(Conflict::Rental);

    rental.or_else(|| {
        reservations
            .iter()
            .filter(|r| r.equipment_id == equipment_id)
            .filter(|r| Some(r.id) != exclusions.reservation)
            .find(|r| r.is_blocking() && r.period.overlaps(period))
            .map(Conflict::Reservation)
    })
}

pub fn is_available(
    equipment_id: EquipmentId,
    period: &DateRange,
    rentals: &[Rental],
    reservations: &[Reservation],
    exclusions: Exclusions,
) -> bool {
    find_conflict(equipment_id, period, rentals, reservations, exclusions).is_none()
}

/// Like [`is_available`] but fails with [`DomainError::EquipmentUnavailable`].
pub fn ensure_available(
    equipment_id: EquipmentId,
    period: &DateRange,
    rentals: &[Rental],
    reservations: &[Reservation],
    exclusions: Exclusions,
) -> DomainResult<()> {
    match find_conflict(equipment_id, period, rentals, reservations, exclusions) {
        None => Ok(()),
        Some(_) => Err(DomainError::EquipmentUnavailable {
            equipment_id: equipment_id.to_string(),
            start: period.start(),
            end: period.end(),
        }),
    }
}
