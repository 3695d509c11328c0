//! In-memory member repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::entities::Member;
use crate::domain::repositories::MemberRepository;
use crate::domain::value_objects::MemberId;
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryMemberRepository {
    members: RwLock<HashMap<MemberId, Member>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), AppError> {
        let mut members = self.members.write().await;
        if members
            .values()
            .any(|m| m.id != member.id && m.email == member.email)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "idx_members_email" }),
            ));
        }
        members.insert(member.id, member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, AppError> {
        Ok(self.members.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        let email = email.trim().to_ascii_lowercase();
        Ok(self
            .members
            .read()
            .await
            .values()
            .find(|m| m.email == email)
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Member>, AppError> {
        let mut members: Vec<Member> = self.members.read().await.values().cloned().collect();
        members.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(members, offset, limit))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.members.read().await.len() as i64)
    }
}
