//! DTOs for member endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Member, NewMember};
use crate::domain::value_objects::MembershipTier;
use crate::error::AppError;

/// Request body for `POST /api/members`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterMemberRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Defaults to `BASIC`.
    #[schema(example = "SILVER")]
    pub tier: Option<String>,
}

impl RegisterMemberRequest {
    pub fn into_new_member(self) -> Result<NewMember, AppError> {
        let tier = match self.tier.as_deref() {
            Some(raw) => raw.parse::<MembershipTier>()?,
            None => MembershipTier::Basic,
        };
        Ok(NewMember {
            name: self.name,
            email: self.email,
            tier,
        })
    }
}

/// Request body for `PATCH /api/members/{id}/tier`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeTierRequest {
    #[schema(example = "GOLD")]
    pub tier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[schema(example = "BASIC")]
    pub tier: String,
    pub active_rentals: u32,
    pub max_concurrent_rentals: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id.as_uuid(),
            name: m.name,
            email: m.email,
            tier: m.tier.to_string(),
            active_rentals: m.active_rentals,
            max_concurrent_rentals: m.tier.max_concurrent_rentals(),
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
