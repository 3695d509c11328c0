//! Rental entity and its lifecycle state machine.
//!
//! ```text
//! PENDING --activate--> ACTIVE --return--> RETURNED
//!    |                    |  \
//!    |                    |   mark_overdue--> OVERDUE --return--> RETURNED
//!    +------cancel--------+--cancel--> CANCELLED
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::fee_calculator;
use crate::domain::value_objects::{
    DateRange, EquipmentId, MemberId, MembershipTier, Money, RentalId, ReservationId,
};

/// Lifecycle state of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    Pending,
    Active,
    Overdue,
    Returned,
    Cancelled,
}

impl RentalStatus {
    pub const ALL: [RentalStatus; 5] = [
        Self::Pending,
        Self::Active,
        Self::Overdue,
        Self::Returned,
        Self::Cancelled,
    ];

    /// Statuses that hold the equipment for the rental period.
    pub const BLOCKING: [RentalStatus; 3] = [Self::Pending, Self::Active, Self::Overdue];

    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Pending | Self::Active | Self::Overdue)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Returned | Self::Cancelled)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Overdue => "OVERDUE",
            Self::Returned => "RETURNED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| DomainError::validation("status", format!("unknown rental status '{s}'")))
    }
}

/// A loan of one piece of equipment to one member for a bounded period.
///
/// The daily rate and tier discount are captured at checkout so later price
/// or tier changes do not alter an existing rental.
#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: RentalId,
    pub equipment_id: EquipmentId,
    pub member_id: MemberId,
    pub reservation_id: Option<ReservationId>,
    pub period: DateRange,
    pub status: RentalStatus,
    pub daily_rate: Money,
    pub discount_percent: u8,
    pub total_cost: Money,
    pub late_fee: Money,
    pub damage_fee: Money,
    pub returned_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for checking out a rental.
#[derive(Debug, Clone)]
pub struct NewRental {
    pub equipment_id: EquipmentId,
    pub member_id: MemberId,
    pub reservation_id: Option<ReservationId>,
    pub period: DateRange,
    pub daily_rate: Money,
    pub tier: MembershipTier,
}

impl Rental {
    /// Creates a `PENDING` rental priced for its period and the member's tier.
    pub fn create(new: NewRental, now: DateTime<Utc>) -> Self {
        let discount_percent = new.tier.discount_percent();
        let total_cost = fee_calculator::rental_cost(new.daily_rate, &new.period, discount_percent);

        Self {
            id: RentalId::new(),
            equipment_id: new.equipment_id,
            member_id: new.member_id,
            reservation_id: new.reservation_id,
            period: new.period,
            status: RentalStatus::Pending,
            daily_rate: new.daily_rate,
            discount_percent,
            total_cost,
            late_fee: Money::ZERO,
            damage_fee: Money::ZERO,
            returned_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn activate(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            RentalStatus::Pending => {
                self.status = RentalStatus::Active;
                self.updated_at = now;
                Ok(())
            }
            other => Err(self.transition_error(other, "activate")),
        }
    }

    /// Whether the rental is past its end date on `today`.
    ///
    /// Pure check: it never changes the status.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        matches!(self.status, RentalStatus::Active | RentalStatus::Overdue)
            && today > self.period.end()
    }

    pub fn days_overdue(&self, today: NaiveDate) -> u32 {
        if self.is_overdue(today) {
            self.period.days_past_end(today)
        } else {
            0
        }
    }

    /// Persists the overdue state for an `ACTIVE` rental past its end date.
    ///
    /// Returns `true` when the status changed.
    pub fn mark_overdue(&mut self, today: NaiveDate, now: DateTime<Utc>) -> bool {
        if self.status == RentalStatus::Active && self.is_overdue(today) {
            self.status = RentalStatus::Overdue;
            self.updated_at = now;
            return true;
        }
        false
    }

    /// Moves the end date later and reprices the rental.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidState`] unless the rental is `ACTIVE`
    /// - [`DomainError::Validation`] if `new_end` is not after the current end
    pub fn extend(&mut self, new_end: NaiveDate, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != RentalStatus::Active {
            return Err(self.transition_error(self.status, "extend"));
        }
        if new_end <= self.period.end() {
            return Err(DomainError::validation(
                "end_date",
                format!(
                    "new end date {new_end} must be after current end date {}",
                    self.period.end()
                ),
            ));
        }

        self.period = self.period.with_end(new_end)?;
        self.total_cost =
            fee_calculator::rental_cost(self.daily_rate, &self.period, self.discount_percent);
        self.updated_at = now;
        Ok(())
    }

    /// Completes the rental and records the late fee.
    ///
    /// # Errors
    ///
    /// - [`DomainError::AlreadyReturned`] if already `RETURNED`
    /// - [`DomainError::AlreadyCancelled`] if `CANCELLED`
    /// - [`DomainError::InvalidState`] if still `PENDING`
    pub fn return_equipment(
        &mut self,
        returned_on: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Money> {
        match self.status {
            RentalStatus::Active | RentalStatus::Overdue => {}
            other => return Err(self.transition_error(other, "return")),
        }

        let days_late = self.period.days_past_end(returned_on);
        self.late_fee = fee_calculator::late_fee(self.daily_rate, days_late, self.discount_percent);
        self.status = RentalStatus::Returned;
        self.returned_on = Some(returned_on);
        self.updated_at = now;
        Ok(self.late_fee)
    }

    pub fn record_damage_fee(&mut self, fee: Money, now: DateTime<Utc>) {
        self.damage_fee = fee;
        self.updated_at = now;
    }

    /// Cancels a rental that has not gone overdue or finished.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.status {
            RentalStatus::Pending | RentalStatus::Active => {
                self.status = RentalStatus::Cancelled;
                self.updated_at = now;
                Ok(())
            }
            other => Err(self.transition_error(other, "cancel")),
        }
    }

    /// Rental cost plus any late and damage fees.
    pub fn total_due(&self) -> Money {
        self.total_cost + self.late_fee + self.damage_fee
    }

    fn transition_error(&self, status: RentalStatus, action: &'static str) -> DomainError {
        match status {
            RentalStatus::Returned => DomainError::AlreadyReturned {
                rental_id: self.id.to_string(),
            },
            RentalStatus::Cancelled => DomainError::AlreadyCancelled {
                entity: "Rental",
                id: self.id.to_string(),
            },
            other => DomainError::invalid_state("Rental", self.id, other, action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn rental(tier: MembershipTier) -> Rental {
        Rental::create(
            NewRental {
                equipment_id: EquipmentId::new(),
                member_id: MemberId::new(),
                reservation_id: None,
                period: DateRange::new(d(4, 1), d(4, 5)).unwrap(),
                daily_rate: Money::from_dollars(20),
                tier,
            },
            Utc::now(),
        )
    }

    fn active(tier: MembershipTier) -> Rental {
        let mut r = rental(tier);
        r.activate(Utc::now()).unwrap();
        r
    }

    #[test]
    fn test_create_prices_with_discount() {
        let r = rental(MembershipTier::Gold);
        assert_eq!(r.status, RentalStatus::Pending);
        // 5 days * $20 = $100, 10% off
        assert_eq!(r.total_cost, Money::from_dollars(90));
        assert_eq!(r.discount_percent, 10);
    }

    #[test]
    fn test_activate_only_from_pending() {
        let mut r = active(MembershipTier::Basic);
        assert_eq!(r.status, RentalStatus::Active);
        assert_eq!(r.activate(Utc::now()).unwrap_err().code(), "INVALID_STATE");
    }

    #[test]
    fn test_second_return_rejected() {
        let mut r = active(MembershipTier::Basic);
        r.return_equipment(d(4, 5), Utc::now()).unwrap();

        let err = r.return_equipment(d(4, 5), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyReturned { .. }));
        assert_eq!(err.code(), "ALREADY_RETURNED");
    }

    #[test]
    fn test_return_pending_rejected() {
        let mut r = rental(MembershipTier::Basic);
        let err = r.return_equipment(d(4, 1), Utc::now()).unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE");
    }

    #[test]
    fn test_return_cancelled_rejected() {
        let mut r = rental(MembershipTier::Basic);
        r.cancel(Utc::now()).unwrap();
        let err = r.return_equipment(d(4, 1), Utc::now()).unwrap_err();
        assert_eq!(err.code(), "ALREADY_CANCELLED");
    }

    #[test]
    fn test_on_time_return_has_no_late_fee() {
        let mut r = active(MembershipTier::Basic);
        let fee = r.return_equipment(d(4, 3), Utc::now()).unwrap();
        assert_eq!(fee, Money::ZERO);
        assert_eq!(r.returned_on, Some(d(4, 3)));
        assert_eq!(r.status, RentalStatus::Returned);
    }

    #[test]
    fn test_late_return_fee_discounted_by_tier() {
        let mut r = active(MembershipTier::Platinum);
        // 3 days late * $20 * 1.5 = $90, 15% off = $76.50
        let fee = r.return_equipment(d(4, 8), Utc::now()).unwrap();
        assert_eq!(fee.cents(), 7650);
        assert_eq!(r.late_fee, fee);
    }

    #[test]
    fn test_overdue_is_pure() {
        let r = active(MembershipTier::Basic);
        assert!(!r.is_overdue(d(4, 5)));
        assert!(r.is_overdue(d(4, 6)));
        assert_eq!(r.days_overdue(d(4, 7)), 2);
        assert_eq!(r.status, RentalStatus::Active);

        let pending = rental(MembershipTier::Basic);
        assert!(!pending.is_overdue(d(5, 1)));
    }

    #[test]
    fn test_mark_overdue_then_return() {
        let mut r = active(MembershipTier::Basic);
        assert!(!r.mark_overdue(d(4, 5), Utc::now()));
        assert!(r.mark_overdue(d(4, 6), Utc::now()));
        assert_eq!(r.status, RentalStatus::Overdue);
        assert!(!r.mark_overdue(d(4, 7), Utc::now()));

        r.return_equipment(d(4, 7), Utc::now()).unwrap();
        assert_eq!(r.status, RentalStatus::Returned);
    }

    #[test]
    fn test_extend() {
        let mut r = active(MembershipTier::Basic);
        r.extend(d(4, 7), Utc::now()).unwrap();
        assert_eq!(r.period.end(), d(4, 7));
        assert_eq!(r.total_cost, Money::from_dollars(140));
    }

    #[test]
    fn test_extend_must_move_end_later() {
        let mut r = active(MembershipTier::Basic);
        assert!(matches!(
            r.extend(d(4, 5), Utc::now()),
            Err(DomainError::Validation { .. })
        ));
        assert!(r.extend(d(4, 2), Utc::now()).is_err());
    }

    #[test]
    fn test_extend_requires_active() {
        let mut r = rental(MembershipTier::Basic);
        assert_eq!(r.extend(d(4, 9), Utc::now()).unwrap_err().code(), "INVALID_STATE");

        let mut overdue = active(MembershipTier::Basic);
        overdue.mark_overdue(d(4, 6), Utc::now());
        assert_eq!(
            overdue.extend(d(4, 9), Utc::now()).unwrap_err().code(),
            "INVALID_STATE"
        );
    }

    #[test]
    fn test_cancel_rules() {
        let mut r = rental(MembershipTier::Basic);
        r.cancel(Utc::now()).unwrap();
        assert_eq!(r.cancel(Utc::now()).unwrap_err().code(), "ALREADY_CANCELLED");

        let mut returned = active(MembershipTier::Basic);
        returned.return_equipment(d(4, 5), Utc::now()).unwrap();
        assert_eq!(returned.cancel(Utc::now()).unwrap_err().code(), "ALREADY_RETURNED");

        let mut overdue = active(MembershipTier::Basic);
        overdue.mark_overdue(d(4, 6), Utc::now());
        assert_eq!(overdue.cancel(Utc::now()).unwrap_err().code(), "INVALID_STATE");
    }

    #[test]
    fn test_total_due() {
        let mut r = active(MembershipTier::Basic);
        r.return_equipment(d(4, 6), Utc::now()).unwrap();
        r.record_damage_fee(Money::from_dollars(50), Utc::now());
        // $100 + $30 late + $50 damage
        assert_eq!(r.total_due(), Money::from_dollars(180));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("overdue".parse::<RentalStatus>().unwrap(), RentalStatus::Overdue);
        assert!("lost".parse::<RentalStatus>().is_err());
    }
}
