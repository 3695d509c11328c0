//! PostgreSQL implementation of the damage assessment repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::DamageAssessmentRow;
use crate::domain::entities::DamageAssessment;
use crate::domain::repositories::DamageAssessmentRepository;
use crate::domain::value_objects::RentalId;
use crate::error::AppError;

/// PostgreSQL repository for damage assessments.
///
/// `rental_id` is unique, so a second assessment for the same rental is a
/// [`AppError::Conflict`].
pub struct PgDamageAssessmentRepository {
    pool: Arc<PgPool>,
}

impl PgDamageAssessmentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DamageAssessmentRepository for PgDamageAssessmentRepository {
    async fn create(&self, assessment: &DamageAssessment) -> Result<(), AppError> {
        let row = DamageAssessmentRow::from(assessment);
        sqlx::query(
            r#"
            INSERT INTO damage_assessments (id, rental_id, equipment_id, condition_before,
                                            condition_after, damage_fee_cents, notes, assessed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(row.id)
        .bind(row.rental_id)
        .bind(row.equipment_id)
        .bind(row.condition_before)
        .bind(row.condition_after)
        .bind(row.damage_fee_cents)
        .bind(row.notes)
        .bind(row.assessed_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_rental(
        &self,
        rental_id: RentalId,
    ) -> Result<Option<DamageAssessment>, AppError> {
        let row = sqlx::query_as::<_, DamageAssessmentRow>(
            r#"
            SELECT id, rental_id, equipment_id, condition_before, condition_after,
                   damage_fee_cents, notes, assessed_at
            FROM damage_assessments
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id.as_uuid())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(DamageAssessment::try_from).transpose()
    }
}
