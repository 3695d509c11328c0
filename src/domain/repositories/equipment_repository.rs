//! Repository trait for equipment inventory.

use async_trait::async_trait;

use crate::domain::entities::Equipment;
use crate::domain::value_objects::EquipmentId;
use crate::error::AppError;

/// Filters for equipment listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentFilter {
    /// Matched case-insensitively.
    pub category: Option<String>,
    pub available: Option<bool>,
}

/// Repository interface for equipment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEquipmentRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryEquipmentRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    /// Inserts or fully replaces an item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the serial number belongs to another item.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, equipment: &Equipment) -> Result<(), AppError>;

    async fn find_by_id(&self, id: EquipmentId) -> Result<Option<Equipment>, AppError>;

    /// Lists items ordered by name.
    async fn list(
        &self,
        filter: &EquipmentFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Equipment>, AppError>;

    async fn count(&self, filter: &EquipmentFilter) -> Result<i64, AppError>;
}
