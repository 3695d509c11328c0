//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime queries mapped through the row structs in [`rows`].
//!
//! # Repositories
//!
//! - [`PgEquipmentRepository`] - equipment inventory
//! - [`PgMemberRepository`] - members
//! - [`PgRentalRepository`] - rentals and overdue lookups
//! - [`PgReservationRepository`] - reservations
//! - [`PgDamageAssessmentRepository`] - damage assessments

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repositories::Repositories;

pub mod pg_damage_assessment_repository;
pub mod pg_equipment_repository;
pub mod pg_member_repository;
pub mod pg_rental_repository;
pub mod pg_reservation_repository;
pub mod pg_storage_health;
pub mod rows;

pub use pg_damage_assessment_repository::PgDamageAssessmentRepository;
pub use pg_equipment_repository::PgEquipmentRepository;
pub use pg_member_repository::PgMemberRepository;
pub use pg_rental_repository::PgRentalRepository;
pub use pg_reservation_repository::PgReservationRepository;
pub use pg_storage_health::PgStorageHealth;

/// Repositories backed by one shared pool.
pub fn pg_repositories(pool: Arc<PgPool>) -> Repositories {
    Repositories {
        equipment: Arc::new(PgEquipmentRepository::new(pool.clone())),
        members: Arc::new(PgMemberRepository::new(pool.clone())),
        rentals: Arc::new(PgRentalRepository::new(pool.clone())),
        reservations: Arc::new(PgReservationRepository::new(pool.clone())),
        assessments: Arc::new(PgDamageAssessmentRepository::new(pool.clone())),
        health: Arc::new(PgStorageHealth::new(pool)),
    }
}
