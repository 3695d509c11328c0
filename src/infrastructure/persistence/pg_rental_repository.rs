//! PostgreSQL implementation of the rental repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

use super::rows::RentalRow;
use crate::domain::entities::{Rental, RentalStatus};
use crate::domain::repositories::{RentalFilter, RentalRepository};
use crate::domain::value_objects::{EquipmentId, MemberId, RentalId};
use crate::error::AppError;

const SELECT_RENTAL: &str = r#"
    SELECT id, equipment_id, member_id, reservation_id, start_date, end_date, status,
           daily_rate_cents, discount_percent, total_cost_cents, late_fee_cents,
           damage_fee_cents, returned_on, created_at, updated_at
    FROM rentals
"#;

fn status_texts(statuses: &[RentalStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &RentalFilter) {
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

/// PostgreSQL repository for rentals.
pub struct PgRentalRepository {
    pool: Arc<PgPool>,
}

impl PgRentalRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_with_statuses(
        &self,
        sql: &str,
        id: Uuid,
        statuses: &[RentalStatus],
    ) -> Result<Vec<Rental>, AppError> {
        let rows = sqlx::query_as::<_, RentalRow>(sql)
            .bind(id)
            .bind(status_texts(statuses))
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Rental::try_from).collect()
    }
}

#[async_trait]
impl RentalRepository for PgRentalRepository {
    async fn save(&self, rental: &Rental) -> Result<(), AppError> {
        let row = RentalRow::from(rental);
        sqlx::query(
            r#"
            INSERT INTO rentals (id, equipment_id, member_id, reservation_id, start_date,
                                 end_date, status, daily_rate_cents, discount_percent,
                                 total_cost_cents, late_fee_cents, damage_fee_cents,
                                 returned_on, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                end_date = EXCLUDED.end_date,
                status = EXCLUDED.status,
                total_cost_cents = EXCLUDED.total_cost_cents,
                late_fee_cents = EXCLUDED.late_fee_cents,
                damage_fee_cents = EXCLUDED.damage_fee_cents,
                returned_on = EXCLUDED.returned_on,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(row.id)
        .bind(row.equipment_id)
        .bind(row.member_id)
        .bind(row.reservation_id)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(row.status)
        .bind(row.daily_rate_cents)
        .bind(row.discount_percent)
        .bind(row.total_cost_cents)
        .bind(row.late_fee_cents)
        .bind(row.damage_fee_cents)
        .bind(row.returned_on)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: RentalId) -> Result<Option<Rental>, AppError> {
        let row = sqlx::query_as::<_, RentalRow>(&format!("{SELECT_RENTAL} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Rental::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &RentalFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rental>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_RENTAL);
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build_query_as::<RentalRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Rental::try_from).collect()
    }

    async fn count(&self, filter: &RentalFilter) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM rentals");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_blocking(&self, equipment_id: EquipmentId) -> Result<Vec<Rental>, AppError> {
        self.fetch_with_statuses(
            &format!("{SELECT_RENTAL} WHERE equipment_id = $1 AND status = ANY($2)"),
            equipment_id.as_uuid(),
            &RentalStatus::BLOCKING,
        )
        .await
    }

    async fn find_open_by_member(&self, member_id: MemberId) -> Result<Vec<Rental>, AppError> {
        self.fetch_with_statuses(
            &format!("{SELECT_RENTAL} WHERE member_id = $1 AND status = ANY($2)"),
            member_id.as_uuid(),
            &RentalStatus::BLOCKING,
        )
        .await
    }

    async fn find_past_due(&self, today: NaiveDate) -> Result<Vec<Rental>, AppError> {
        let rows = sqlx::query_as::<_, RentalRow>(&format!(
            "{SELECT_RENTAL} WHERE status = ANY($1) AND end_date < $2 ORDER BY end_date, id"
        ))
        .bind(status_texts(&[RentalStatus::Active, RentalStatus::Overdue]))
        .bind(today)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Rental::try_from).collect()
    }
}
