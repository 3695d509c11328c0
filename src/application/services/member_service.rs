//! Member registration, tiers and deactivation.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Member, NewMember, Rental};
use crate::domain::events::DomainEvent;
use crate::domain::ports::{Clock, EventPublisher};
use crate::domain::repositories::{MemberRepository, RentalFilter, RentalRepository};
use crate::domain::value_objects::{MemberId, MembershipTier};
use crate::error::AppError;

pub struct MemberService {
    members: Arc<dyn MemberRepository>,
    rentals: Arc<dyn RentalRepository>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl MemberService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        rentals: Arc<dyn RentalRepository>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            members,
            rentals,
            events,
            clock,
        }
    }

    /// Registers a member.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a blank name or malformed email.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, new: NewMember) -> Result<Member, AppError> {
        let now = self.clock.now();
        let member = Member::register(new, now)?;

        if self.members.find_by_email(&member.email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "email": member.email }),
            ));
        }

        self.members.save(&member).await?;

        tracing::info!(member_id = %member.id, tier = %member.tier, "Member registered");
        self.events
            .publish(DomainEvent::MemberRegistered {
                member_id: member.id,
                occurred_at: now,
            })
            .await;

        Ok(member)
    }

    pub async fn get(&self, id: MemberId) -> Result<Member, AppError> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found", json!({ "member_id": id })))
    }

    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<Member>, i64), AppError> {
        let members = self.members.list(offset, limit).await?;
        let total = self.members.count().await?;
        Ok((members, total))
    }

    /// Moves a member to another tier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unprocessable`] (`RENTAL_NOT_ALLOWED`) when the
    /// member holds more rentals than the new tier allows.
    pub async fn change_tier(&self, id: MemberId, tier: MembershipTier) -> Result<Member, AppError> {
        let mut member = self.get(id).await?;
        let previous = member.tier;
        if previous == tier {
            return Ok(member);
        }

        let now = self.clock.now();
        member.change_tier(tier, now)?;
        self.members.save(&member).await?;

        tracing::info!(member_id = %id, from = %previous, to = %tier, "Membership tier changed");
        self.events
            .publish(DomainEvent::MemberTierChanged {
                member_id: id,
                from: previous,
                to: tier,
                occurred_at: now,
            })
            .await;

        Ok(member)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] (`INVALID_STATE`) when the member is
    /// already inactive or still holds rentals.
    pub async fn deactivate(&self, id: MemberId) -> Result<Member, AppError> {
        let mut member = self.get(id).await?;
        let now = self.clock.now();
        member.deactivate(now)?;
        self.members.save(&member).await?;

        tracing::info!(member_id = %id, "Member deactivated");
        self.events
            .publish(DomainEvent::MemberDeactivated {
                member_id: id,
                occurred_at: now,
            })
            .await;

        Ok(member)
    }

    /// Lists a member's rentals, newest first.
    pub async fn rentals(
        &self,
        id: MemberId,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Rental>, i64), AppError> {
        self.get(id).await?;
        let filter = RentalFilter::for_member(id);
        let rentals = self.rentals.list(&filter, offset, limit).await?;
        let total = self.rentals.count(&filter).await?;
        Ok((rentals, total))
    }
}
