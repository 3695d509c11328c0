//! PostgreSQL implementation of the member repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::MemberRow;
use crate::domain::entities::Member;
use crate::domain::repositories::MemberRepository;
use crate::domain::value_objects::MemberId;
use crate::error::AppError;

const SELECT_MEMBER: &str = r#"
    SELECT id, name, email, membership_tier, active_rentals, is_active, created_at, updated_at
    FROM members
"#;

/// PostgreSQL repository for members.
///
/// The unique index on `email` turns duplicate registrations into
/// [`AppError::Conflict`].
pub struct PgMemberRepository {
    pool: Arc<PgPool>,
}

impl PgMemberRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), AppError> {
        let row = MemberRow::from(member);
        sqlx::query(
            r#"
            INSERT INTO members (id, name, email, membership_tier, active_rentals,
                                 is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                membership_tier = EXCLUDED.membership_tier,
                active_rentals = EXCLUDED.active_rentals,
                is_active = EXCLUDED.is_active,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(row.id)
        .bind(row.name)
        .bind(row.email)
        .bind(row.membership_tier)
        .bind(row.active_rentals)
        .bind(row.is_active)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, AppError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!("{SELECT_MEMBER} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!("{SELECT_MEMBER} WHERE email = $1"))
            .bind(email.trim().to_ascii_lowercase())
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Member::try_from).transpose()
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Member>, AppError> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "{SELECT_MEMBER} ORDER BY created_at, id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }
}
