//! PostgreSQL implementation of the reservation repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::rows::ReservationRow;
use crate::domain::entities::{Reservation, ReservationStatus};
use crate::domain::repositories::{ReservationFilter, ReservationRepository};
use crate::domain::value_objects::{EquipmentId, ReservationId};
use crate::error::AppError;

const SELECT_RESERVATION: &str = r#"
    SELECT id, equipment_id, member_id, start_date, end_date, status, rental_id,
           notes, created_at, updated_at
    FROM reservations
"#;

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ReservationFilter) {
    builder.push(" WHERE TRUE");
    if let Some(member_id) = filter.member_id {
        builder.push(" AND member_id = ").push_bind(member_id.as_uuid());
    }
    if let Some(equipment_id) = filter.equipment_id {
        builder
            .push(" AND equipment_id = ")
            .push_bind(equipment_id.as_uuid());
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }
}

/// PostgreSQL repository for reservations.
pub struct PgReservationRepository {
    pool: Arc<PgPool>,
}

impl PgReservationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn save(&self, reservation: &Reservation) -> Result<(), AppError> {
        let row = ReservationRow::from(reservation);
        sqlx::query(
            r#"
            INSERT INTO reservations (id, equipment_id, member_id, start_date, end_date,
                                      status, rental_id, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                rental_id = EXCLUDED.rental_id,
                notes = EXCLUDED.notes,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(row.id)
        .bind(row.equipment_id)
        .bind(row.member_id)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(row.status)
        .bind(row.rental_id)
        .bind(row.notes)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>, AppError> {
        let row =
            sqlx::query_as::<_, ReservationRow>(&format!("{SELECT_RESERVATION} WHERE id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(self.pool.as_ref())
                .await?;

        row.map(Reservation::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &ReservationFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Reservation>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_RESERVATION);
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY start_date, id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build_query_as::<ReservationRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn count(&self, filter: &ReservationFilter) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM reservations");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_blocking(
        &self,
        equipment_id: EquipmentId,
    ) -> Result<Vec<Reservation>, AppError> {
        let statuses: Vec<String> = ReservationStatus::BLOCKING
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let rows = sqlx::query_as::<_, ReservationRow>(&format!(
            "{SELECT_RESERVATION} WHERE equipment_id = $1 AND status = ANY($2)"
        ))
        .bind(equipment_id.as_uuid())
        .bind(statuses)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Reservation::try_from).collect()
    }
}
