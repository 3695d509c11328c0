//! PostgreSQL implementation of the equipment repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::rows::EquipmentRow;
use crate::domain::entities::Equipment;
use crate::domain::repositories::{EquipmentFilter, EquipmentRepository};
use crate::domain::value_objects::EquipmentId;
use crate::error::AppError;

const SELECT_EQUIPMENT: &str = r#"
    SELECT id, name, description, category, serial_number, daily_rate_cents,
           condition, is_available, current_rental_id, created_at, updated_at
    FROM equipment
"#;

/// PostgreSQL repository for the equipment inventory.
pub struct PgEquipmentRepository {
    pool: Arc<PgPool>,
}

impl PgEquipmentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &EquipmentFilter) {
    builder.push(" WHERE TRUE");
    if let Some(category) = &filter.category {
        builder
            .push(" AND category = ")
            .push_bind(category.trim().to_ascii_lowercase());
    }
    if let Some(available) = filter.available {
        builder.push(" AND is_available = ").push_bind(available);
    }
}

#[async_trait]
impl EquipmentRepository for PgEquipmentRepository {
    async fn save(&self, equipment: &Equipment) -> Result<(), AppError> {
        let row = EquipmentRow::from(equipment);
        sqlx::query(
            r#"
            INSERT INTO equipment (id, name, description, category, serial_number,
                                   daily_rate_cents, condition, is_available,
                                   current_rental_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                category = EXCLUDED.category,
                serial_number = EXCLUDED.serial_number,
                daily_rate_cents = EXCLUDED.daily_rate_cents,
                condition = EXCLUDED.condition,
                is_available = EXCLUDED.is_available,
                current_rental_id = EXCLUDED.current_rental_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.description)
        .bind(row.category)
        .bind(row.serial_number)
        .bind(row.daily_rate_cents)
        .bind(row.condition)
        .bind(row.is_available)
        .bind(row.current_rental_id)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: EquipmentId) -> Result<Option<Equipment>, AppError> {
        let row = sqlx::query_as::<_, EquipmentRow>(&format!("{SELECT_EQUIPMENT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Equipment::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &EquipmentFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Equipment>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_EQUIPMENT);
        push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY name, id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build_query_as::<EquipmentRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Equipment::try_from).collect()
    }

    async fn count(&self, filter: &EquipmentFilter) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM equipment");
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
