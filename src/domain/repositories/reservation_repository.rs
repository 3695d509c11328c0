//! Repository trait for reservations.

use async_trait::async_trait;

use crate::domain::entities::{Reservation, ReservationStatus};
use crate::domain::value_objects::{EquipmentId, MemberId, ReservationId};
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub member_id: Option<MemberId>,
    pub equipment_id: Option<EquipmentId>,
    pub status: Option<ReservationStatus>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts or fully replaces a reservation.
    async fn save(&self, reservation: &Reservation) -> Result<(), AppError>;

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, AppError>;

    /// Lists reservations ordered by start date.
    async fn list(
        &self,
        filter: &ReservationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Reservation>, AppError>;

    async fn count(&self, filter: &ReservationFilter) -> Result<i64, AppError>;

    /// Reservations of `equipment_id` in a blocking status.
    async fn find_blocking(
        &self,
        equipment_id: EquipmentId,
    ) -> Result<Vec<Reservation>, AppError>;
}
