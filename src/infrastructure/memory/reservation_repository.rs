//! In-memory reservation repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::entities::Reservation;
use crate::domain::repositories::{ReservationFilter, ReservationRepository};
use crate::domain::value_objects::{EquipmentId, ReservationId};
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryReservationRepository {
    reservations: RwLock<HashMap<ReservationId, Reservation>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(reservation: &Reservation, filter: &ReservationFilter) -> bool {
    filter.member_id.is_none_or(|id| reservation.member_id == id)
        && filter
            .equipment_id
            .is_none_or(|id| reservation.equipment_id == id)
        && filter.status.is_none_or(|s| reservation.status == s)
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: &Reservation) -> Result<(), AppError> {
        self.reservations
            .write()
            .await
            .insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, AppError> {
        Ok(self.reservations.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &ReservationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Reservation>, AppError> {
        let mut reservations: Vec<Reservation> = self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| matches(r, filter))
            .cloned()
            .collect();
        reservations.sort_by_key(|r| (r.period.start(), r.id));
        Ok(paginate(reservations, offset, limit))
    }

    async fn count(&self, filter: &ReservationFilter) -> Result<i64, AppError> {
        let reservations = self.reservations.read().await;
        Ok(reservations.values().filter(|r| matches(r, filter)).count() as i64)
    }

    async fn find_blocking(
        &self,
        equipment_id: EquipmentId,
    ) -> Result<Vec<Reservation>, AppError> {
        Ok(self
            .reservations
            .read()
            .await
            .values()
            .filter(|r| r.equipment_id == equipment_id && r.is_blocking())
            .cloned()
            .collect())
    }
}
