//! In-process repository implementations.
//!
//! Used by the handler tests and by `STORAGE=memory` to run the API without
//! a database. State is lost on restart.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::repositories::{Repositories, StorageHealth};
use crate::error::AppError;

pub mod damage_assessment_repository;
pub mod equipment_repository;
pub mod member_repository;
pub mod rental_repository;
pub mod reservation_repository;

pub use damage_assessment_repository::InMemoryDamageAssessmentRepository;
pub use equipment_repository::InMemoryEquipmentRepository;
pub use member_repository::InMemoryMemberRepository;
pub use rental_repository::InMemoryRentalRepository;
pub use reservation_repository::InMemoryReservationRepository;

/// Always-healthy probe for the in-memory backend.
#[derive(Debug, Default)]
pub struct InMemoryStorageHealth;

#[async_trait]
impl StorageHealth for InMemoryStorageHealth {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// A fresh, empty set of in-memory repositories.
pub fn memory_repositories() -> Repositories {
    Repositories {
        equipment: Arc::new(InMemoryEquipmentRepository::new()),
        members: Arc::new(InMemoryMemberRepository::new()),
        rentals: Arc::new(InMemoryRentalRepository::new()),
        reservations: Arc::new(InMemoryReservationRepository::new()),
        assessments: Arc::new(InMemoryDamageAssessmentRepository::new()),
        health: Arc::new(InMemoryStorageHealth),
    }
}

/// Applies `offset`/`limit` to an already ordered list.
pub(crate) fn paginate<T>(items: Vec<T>, offset: i64, limit: i64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    items.into_iter().skip(offset).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let items: Vec<i32> = (1..=30).collect();
        assert_eq!(paginate(items.clone(), 0, 10), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(items.clone(), 25, 10), (26..=30).collect::<Vec<_>>());
        assert!(paginate(items, 40, 10).is_empty());
    }
}
