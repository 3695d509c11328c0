//! Repository trait for rentals.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::{Rental, RentalStatus};
use crate::domain::value_objects::{EquipmentId, MemberId, RentalId};
use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalFilter {
    pub member_id: Option<MemberId>,
    pub equipment_id: Option<EquipmentId>,
    pub status: Option<RentalStatus>,
}

impl RentalFilter {
    pub fn for_member(member_id: MemberId) -> Self {
        Self {
            member_id: Some(member_id),
            ..Self::default()
        }
    }
}

/// Repository interface for rentals.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRentalRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryRentalRepository`] - in-process store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Inserts or fully replaces a rental.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, rental: &Rental) -> Result<(), AppError>;

    async fn find_by_id(&self, id: RentalId) -> Result<Option<Rental>, AppError>;

    /// Lists rentals, newest first.
    async fn list(
        &self,
        filter: &RentalFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rental>, AppError>;

    async fn count(&self, filter: &RentalFilter) -> Result<i64, AppError>;

    /// Rentals of `equipment_id` in a blocking status.
    async fn find_blocking(&self, equipment_id: EquipmentId) -> Result<Vec<Rental>, AppError>;

    /// Rentals of `member_id` in a blocking status.
    async fn find_open_by_member(&self, member_id: MemberId) -> Result<Vec<Rental>, AppError>;

    /// `ACTIVE` or `OVERDUE` rentals whose end date is before `today`.
    async fn find_past_due(&self, today: NaiveDate) -> Result<Vec<Rental>, AppError>;
}
