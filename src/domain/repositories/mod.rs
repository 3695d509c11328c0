//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence` (PostgreSQL) and
//! `crate::infrastructure::memory` (in-process). Mock implementations are
//! generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`EquipmentRepository`] - equipment inventory
//! - [`MemberRepository`] - members and tiers
//! - [`RentalRepository`] - rentals and overdue lookups
//! - [`ReservationRepository`] - reservations
//! - [`DamageAssessmentRepository`] - assessments recorded at return
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

use std::sync::Arc;

pub mod damage_assessment_repository;
pub mod equipment_repository;
pub mod member_repository;
pub mod rental_repository;
pub mod reservation_repository;
pub mod storage_health;

pub use damage_assessment_repository::DamageAssessmentRepository;
pub use equipment_repository::{EquipmentFilter, EquipmentRepository};
pub use member_repository::MemberRepository;
pub use rental_repository::{RentalFilter, RentalRepository};
pub use reservation_repository::{ReservationFilter, ReservationRepository};
pub use storage_health::StorageHealth;

#[cfg(test)]
pub use damage_assessment_repository::MockDamageAssessmentRepository;
#[cfg(test)]
pub use equipment_repository::MockEquipmentRepository;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
#[cfg(test)]
pub use rental_repository::MockRentalRepository;
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
#[cfg(test)]
pub use storage_health::MockStorageHealth;

/// One storage backend's repositories, shared by the application services.
#[derive(Clone)]
pub struct Repositories {
    pub equipment: Arc<dyn EquipmentRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub rentals: Arc<dyn RentalRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub assessments: Arc<dyn DamageAssessmentRepository>,
    pub health: Arc<dyn StorageHealth>,
}
