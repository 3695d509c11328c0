//! Repository trait for members.

use async_trait::async_trait;

use crate::domain::entities::Member;
use crate::domain::value_objects::MemberId;
use crate::error::AppError;

/// Repository interface for members.
///
/// Emails are stored lowercased and are unique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Inserts or fully replaces a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email belongs to another member.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, member: &Member) -> Result<(), AppError>;

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError>;

    /// Lists members ordered by registration time.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Member>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
