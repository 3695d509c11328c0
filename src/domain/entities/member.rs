//! Member entity: a customer holding a membership tier.

use chrono::{DateTime, Utc};
use validator::ValidateEmail;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{DateRange, MemberId, MembershipTier};

/// A registered customer.
///
/// `active_rentals` counts pending, active and overdue rentals and never
/// exceeds the tier's concurrent maximum. Members are deactivated, never purged.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub tier: MembershipTier,
    pub active_rentals: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering a member.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub tier: MembershipTier,
}

impl Member {
    /// Registers a new active member with no rentals.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for a blank name or malformed email.
    pub fn register(new: NewMember, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }

        let email = new.email.trim().to_ascii_lowercase();
        if !email.validate_email() {
            return Err(DomainError::validation(
                "email",
                format!("'{}' is not a valid email address", new.email),
            ));
        }

        Ok(Self {
            id: MemberId::new(),
            name: name.to_string(),
            email,
            tier: new.tier,
            active_rentals: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks membership status and the concurrent rental limit.
    pub fn ensure_can_rent(&self) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::not_allowed(format!(
                "member {} is deactivated",
                self.id
            )));
        }
        let max = self.tier.max_concurrent_rentals();
        if self.active_rentals >= max {
            return Err(DomainError::not_allowed(format!(
                "member {} already holds {} of {} rentals allowed for {} tier",
                self.id, self.active_rentals, max, self.tier
            )));
        }
        Ok(())
    }

    /// Checks a requested period against the tier's maximum rental length.
    pub fn ensure_rental_length(&self, period: &DateRange) -> DomainResult<()> {
        let max_days = self.tier.max_rental_days();
        if period.days() > max_days {
            return Err(DomainError::not_allowed(format!(
                "{} days exceeds the {} day limit for {} tier",
                period.days(),
                max_days,
                self.tier
            )));
        }
        Ok(())
    }

    pub fn start_rental(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_can_rent()?;
        self.active_rentals += 1;
        self.updated_at = now;
        Ok(())
    }

    pub fn end_rental(&mut self, now: DateTime<Utc>) {
        self.active_rentals = self.active_rentals.saturating_sub(1);
        self.updated_at = now;
    }

    /// Moves the member to another tier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RentalNotAllowed`] if the member holds more
    /// rentals than the new tier permits.
    pub fn change_tier(&mut self, tier: MembershipTier, now: DateTime<Utc>) -> DomainResult<()> {
        if self.active_rentals > tier.max_concurrent_rentals() {
            return Err(DomainError::not_allowed(format!(
                "member holds {} rentals, {} tier allows {}",
                self.active_rentals,
                tier,
                tier.max_concurrent_rentals()
            )));
        }
        self.tier = tier;
        self.updated_at = now;
        Ok(())
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_active {
            return Err(DomainError::invalid_state(
                "Member",
                self.id,
                "INACTIVE",
                "deactivate",
            ));
        }
        if self.active_rentals > 0 {
            return Err(DomainError::invalid_state(
                "Member",
                self.id,
                format!("HOLDING_{}_RENTALS", self.active_rentals),
                "deactivate",
            ));
        }
        self.is_active = false;
        self.updated_at = now;
        Ok(())
    }
}
