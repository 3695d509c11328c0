//! DTOs for reservation endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::rentals::RentalResponse;
use crate::domain::entities::{NewReservation, Rental, Reservation, ReservationStatus};
use crate::domain::repositories::ReservationFilter;
use crate::domain::value_objects::DateRange;
use crate::error::AppError;

/// Request body for `POST /api/reservations`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    pub equipment_id: Uuid,
    pub member_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl CreateReservationRequest {
    pub fn into_new_reservation(self) -> Result<NewReservation, AppError> {
        Ok(NewReservation {
            equipment_id: self.equipment_id.into(),
            member_id: self.member_id.into(),
            period: DateRange::new(self.start_date, self.end_date)?,
            notes: self.notes,
        })
    }
}

/// Query for `GET /api/reservations`.
#[derive(Debug, Deserialize)]
pub struct ReservationListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    pub member_id: Option<Uuid>,
    pub equipment_id: Option<Uuid>,
    pub status: Option<String>,
}

impl ReservationListQuery {
    pub fn filter(&self) -> Result<ReservationFilter, AppError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<ReservationStatus>)
            .transpose()?;
        Ok(ReservationFilter {
            member_id: self.member_id.map(Into::into),
            equipment_id: self.equipment_id.map(Into::into),
            status,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub member_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[schema(example = "PENDING")]
    pub status: String,
    pub rental_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id.as_uuid(),
            equipment_id: r.equipment_id.as_uuid(),
            member_id: r.member_id.as_uuid(),
            start_date: r.period.start(),
            end_date: r.period.end(),
            status: r.status.to_string(),
            rental_id: r.rental_id.map(|id| id.as_uuid()),
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response for `POST /api/reservations/{id}/fulfill`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FulfillResponse {
    pub reservation: ReservationResponse,
    pub rental: RentalResponse,
}

impl From<(Reservation, Rental)> for FulfillResponse {
    fn from((reservation, rental): (Reservation, Rental)) -> Self {
        Self {
            reservation: reservation.into(),
            rental: rental.into(),
        }
    }
}
