//! In-memory rental repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::entities::{Rental, RentalStatus};
use crate::domain::repositories::{RentalFilter, RentalRepository};
use crate::domain::value_objects::{EquipmentId, MemberId, RentalId};
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryRentalRepository {
    rentals: RwLock<HashMap<RentalId, Rental>>,
}

impl InMemoryRentalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, predicate: impl Fn(&Rental) -> bool) -> Vec<Rental> {
        self.rentals
            .read()
            .await
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

fn matches(rental: &Rental, filter: &RentalFilter) -> bool {
    filter.member_id.is_none_or(|id| rental.member_id == id)
        && filter.equipment_id.is_none_or(|id| rental.equipment_id == id)
        && filter.status.is_none_or(|s| rental.status == s)
}

#[async_trait]
impl RentalRepository for InMemoryRentalRepository {
    async fn save(&self, rental: &Rental) -> Result<(), AppError> {
        self.rentals.write().await.insert(rental.id, rental.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RentalId) -> Result<Option<Rental>, AppError> {
        Ok(self.rentals.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &RentalFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rental>, AppError> {
        let mut rentals = self.select(|r| matches(r, filter)).await;
        rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(rentals, offset, limit))
    }

    async fn count(&self, filter: &RentalFilter) -> Result<i64, AppError> {
        Ok(self.select(|r| matches(r, filter)).await.len() as i64)
    }

    async fn find_blocking(&self, equipment_id: EquipmentId) -> Result<Vec<Rental>, AppError> {
        Ok(self
            .select(|r| r.equipment_id == equipment_id && r.status.is_blocking())
            .await)
    }

    async fn find_open_by_member(&self, member_id: MemberId) -> Result<Vec<Rental>, AppError> {
        Ok(self
            .select(|r| r.member_id == member_id && r.status.is_blocking())
            .await)
    }

    async fn find_past_due(&self, today: NaiveDate) -> Result<Vec<Rental>, AppError> {
        let mut rentals = self
            .select(|r| {
                matches!(r.status, RentalStatus::Active | RentalStatus::Overdue)
                    && r.period.end() < today
            })
            .await;
        rentals.sort_by_key(|r| (r.period.end(), r.id));
        Ok(rentals)
    }
}
