//! Rental checkout, lifecycle transitions, returns and overdue sweeps.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use crate::application::services::AvailabilityService;
use crate::domain::entities::{
    DamageAssessment, Equipment, Member, NewRental, Rental, Reservation,
};
use crate::domain::errors::DomainError;
use crate::domain::events::DomainEvent;
use crate::domain::ports::{ChargeKind, Clock, EventPublisher, PaymentRequest, PaymentService};
use crate::domain::repositories::{
    DamageAssessmentRepository, EquipmentRepository, MemberRepository, RentalFilter,
    RentalRepository, Repositories,
};
use crate::domain::services::Exclusions;
use crate::domain::value_objects::{
    DateRange, EquipmentCondition, EquipmentId, MemberId, Money, RentalId, ReservationId,
};
use crate::error::AppError;

/// Checkout input.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub equipment_id: EquipmentId,
    pub member_id: MemberId,
    pub period: DateRange,
}

/// Result of returning a rental.
#[derive(Debug, Clone)]
pub struct ReturnOutcome {
    pub rental: Rental,
    pub assessment: Option<DamageAssessment>,
}

pub struct RentalService {
    equipment: Arc<dyn EquipmentRepository>,
    members: Arc<dyn MemberRepository>,
    rentals: Arc<dyn RentalRepository>,
    assessments: Arc<dyn DamageAssessmentRepository>,
    availability: Arc<AvailabilityService>,
    payments: Arc<dyn PaymentService>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RentalService {
    pub fn new(
        repositories: &Repositories,
        availability: Arc<AvailabilityService>,
        payments: Arc<dyn PaymentService>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            equipment: repositories.equipment.clone(),
            members: repositories.members.clone(),
            rentals: repositories.rentals.clone(),
            assessments: repositories.assessments.clone(),
            availability,
            payments,
            events,
            clock,
        }
    }

    /// Checks out equipment to a member.
    ///
    /// A rental starting today is activated at once and the equipment is
    /// handed over; a later start stays `PENDING` until activated. The rental
    /// total is charged before anything is stored.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown member or equipment
    /// - `RENTAL_OVERDUE` when the member has an overdue rental
    /// - `RENTAL_NOT_ALLOWED` for an inactive member, a full tier quota, a
    ///   period longer than the tier allows or an unrentable item
    /// - [`AppError::Validation`] for a start date in the past
    /// - `EQUIPMENT_UNAVAILABLE` when the period overlaps another booking
    pub async fn checkout(&self, request: Checkout) -> Result<Rental, AppError> {
        self.checkout_with(request, None, Exclusions::none()).await
    }

    /// Checks out the rental for a confirmed reservation.
    ///
    /// The reservation itself is excluded from the availability check.
    pub async fn checkout_reservation(&self, reservation: &Reservation) -> Result<Rental, AppError> {
        self.checkout_with(
            Checkout {
                equipment_id: reservation.equipment_id,
                member_id: reservation.member_id,
                period: reservation.period,
            },
            Some(reservation.id),
            Exclusions::reservation(reservation.id),
        )
        .await
    }

    async fn checkout_with(
        &self,
        request: Checkout,
        reservation_id: Option<ReservationId>,
        exclusions: Exclusions,
    ) -> Result<Rental, AppError> {
        let now = self.clock.now();
        let today = self.clock.today();

        let mut member = self.load_member(request.member_id).await?;
        member.ensure_can_rent()?;

        let open = self.rentals.find_open_by_member(member.id).await?;
        if let Some(overdue) = open.iter().find(|r| r.is_overdue(today)) {
            return Err(DomainError::RentalOverdue {
                member_id: member.id.to_string(),
                rental_id: overdue.id.to_string(),
            }
            .into());
        }

        member.ensure_rental_length(&request.period)?;
        if request.period.start() < today {
            return Err(DomainError::validation(
                "start_date",
                format!("rental cannot start in the past ({})", request.period.start()),
            )
            .into());
        }

        let mut equipment = self.load_equipment(request.equipment_id).await?;
        equipment.ensure_bookable()?;
        self.availability
            .ensure_available(equipment.id, &request.period, exclusions)
            .await?;

        let mut rental = Rental::create(
            NewRental {
                equipment_id: equipment.id,
                member_id: member.id,
                reservation_id,
                period: request.period,
                daily_rate: equipment.daily_rate,
                tier: member.tier,
            },
            now,
        );

        let starts_today = rental.period.start() == today;
        if starts_today {
            if !equipment.is_rentable() {
                return Err(unavailable(&equipment.id, &rental.period));
            }
            rental.activate(now)?;
            equipment.mark_as_rented(rental.id, now)?;
        }
        member.start_rental(now)?;

        self.charge(&rental, rental.total_cost, ChargeKind::RentalFee)
            .await?;

        self.rentals.save(&rental).await?;
        if starts_today {
            self.equipment.save(&equipment).await?;
        }
        self.members.save(&member).await?;

        metrics::counter!("rentals_created_total").increment(1);
        tracing::info!(
            rental_id = %rental.id,
            equipment_id = %rental.equipment_id,
            member_id = %rental.member_id,
            status = %rental.status,
            total = %rental.total_cost,
            "Rental checked out"
        );

        self.events
            .publish(DomainEvent::RentalCreated {
                rental_id: rental.id,
                equipment_id: rental.equipment_id,
                member_id: rental.member_id,
                start: rental.period.start(),
                end: rental.period.end(),
                total_cost: rental.total_cost,
                occurred_at: now,
            })
            .await;
        if starts_today {
            self.publish_activated(&rental).await;
        }

        Ok(rental)
    }

    /// Hands over the equipment for a `PENDING` rental.
    pub async fn activate(&self, id: RentalId) -> Result<Rental, AppError> {
        let now = self.clock.now();
        let mut rental = self.get(id).await?;
        rental.activate(now)?;

        let mut equipment = self.load_equipment(rental.equipment_id).await?;
        if !equipment.is_rentable() {
            return Err(unavailable(&equipment.id, &rental.period));
        }
        equipment.mark_as_rented(rental.id, now)?;

        self.rentals.save(&rental).await?;
        self.equipment.save(&equipment).await?;

        tracing::info!(rental_id = %id, "Rental activated");
        self.publish_activated(&rental).await;
        Ok(rental)
    }

    /// Moves the end date of an `ACTIVE` rental later and charges the difference.
    ///
    /// # Errors
    ///
    /// - `INVALID_STATE` unless the rental is `ACTIVE`
    /// - [`AppError::Validation`] if `new_end` is not after the current end
    /// - `RENTAL_NOT_ALLOWED` if the longer period exceeds the tier limit
    /// - `EQUIPMENT_UNAVAILABLE` if the added days are booked
    pub async fn extend(&self, id: RentalId, new_end: NaiveDate) -> Result<Rental, AppError> {
        let now = self.clock.now();
        let current = self.get(id).await?;

        let mut rental = current.clone();
        rental.extend(new_end, now)?;

        let member = self.load_member(rental.member_id).await?;
        member.ensure_rental_length(&rental.period)?;
        self.availability
            .ensure_available(rental.equipment_id, &rental.period, Exclusions::rental(id))
            .await?;

        let extra = rental.total_cost.checked_sub(current.total_cost)?;
        self.charge(&rental, extra, ChargeKind::RentalFee).await?;
        self.rentals.save(&rental).await?;

        tracing::info!(rental_id = %id, %new_end, "Rental extended");
        self.events
            .publish(DomainEvent::RentalExtended {
                rental_id: id,
                member_id: rental.member_id,
                new_end,
                occurred_at: now,
            })
            .await;

        Ok(rental)
    }

    /// Takes the equipment back in the observed `condition`.
    ///
    /// Charges the late fee and, when the condition degraded, records a
    /// damage assessment and charges its fee.
    ///
    /// # Errors
    ///
    /// - `ALREADY_RETURNED` / `ALREADY_CANCELLED` for finished rentals
    /// - `INVALID_STATE` for a `PENDING` rental
    pub async fn return_rental(
        &self,
        id: RentalId,
        condition: EquipmentCondition,
        notes: Option<String>,
    ) -> Result<ReturnOutcome, AppError> {
        let now = self.clock.now();
        let today = self.clock.today();

        let mut rental = self.get(id).await?;
        let mut equipment = self.load_equipment(rental.equipment_id).await?;
        let mut member = self.load_member(rental.member_id).await?;

        let condition_before = equipment.condition;
        let late_fee = rental.return_equipment(today, now)?;

        let assessment = DamageAssessment::assess(&rental, condition_before, condition, notes, now)?;
        if let Some(assessment) = &assessment {
            rental.record_damage_fee(assessment.damage_fee, now);
        }

        equipment.mark_as_returned(condition, now);
        member.end_rental(now);

        self.charge(&rental, late_fee, ChargeKind::LateFee).await?;
        self.charge(&rental, rental.damage_fee, ChargeKind::DamageFee)
            .await?;

        self.rentals.save(&rental).await?;
        if let Some(assessment) = &assessment {
            self.assessments.create(assessment).await?;
        }
        self.equipment.save(&equipment).await?;
        self.members.save(&member).await?;

        metrics::counter!("rentals_returned_total").increment(1);
        tracing::info!(
            rental_id = %id,
            %condition,
            late_fee = %rental.late_fee,
            damage_fee = %rental.damage_fee,
            "Rental returned"
        );

        self.events
            .publish(DomainEvent::RentalReturned {
                rental_id: id,
                equipment_id: rental.equipment_id,
                member_id: rental.member_id,
                late_fee: rental.late_fee,
                damage_fee: rental.damage_fee,
                occurred_at: now,
            })
            .await;
        if let Some(assessment) = &assessment {
            self.events
                .publish(DomainEvent::DamageAssessed {
                    assessment_id: assessment.id,
                    rental_id: id,
                    member_id: rental.member_id,
                    damage_fee: assessment.damage_fee,
                    occurred_at: now,
                })
                .await;
        }

        Ok(ReturnOutcome { rental, assessment })
    }

    /// Cancels a `PENDING` or `ACTIVE` rental and frees the equipment.
    pub async fn cancel(&self, id: RentalId) -> Result<Rental, AppError> {
        let now = self.clock.now();
        let mut rental = self.get(id).await?;
        rental.cancel(now)?;

        let mut equipment = self.load_equipment(rental.equipment_id).await?;
        equipment.release(rental.id, now);
        let mut member = self.load_member(rental.member_id).await?;
        member.end_rental(now);

        self.rentals.save(&rental).await?;
        self.equipment.save(&equipment).await?;
        self.members.save(&member).await?;

        tracing::info!(rental_id = %id, "Rental cancelled");
        self.events
            .publish(DomainEvent::RentalCancelled {
                rental_id: id,
                member_id: rental.member_id,
                occurred_at: now,
            })
            .await;

        Ok(rental)
    }

    pub async fn get(&self, id: RentalId) -> Result<Rental, AppError> {
        self.rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Rental not found", json!({ "rental_id": id })))
    }

    pub async fn list(
        &self,
        filter: &RentalFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Rental>, i64), AppError> {
        let rentals = self.rentals.list(filter, offset, limit).await?;
        let total = self.rentals.count(filter).await?;
        Ok((rentals, total))
    }

    /// Rentals overdue as of today, whether or not the sweep has marked them.
    pub async fn overdue(&self) -> Result<Vec<Rental>, AppError> {
        let today = self.clock.today();
        let rentals = self.rentals.find_past_due(today).await?;
        Ok(rentals.into_iter().filter(|r| r.is_overdue(today)).collect())
    }

    /// Persists `ACTIVE -> OVERDUE` for every rental past its end date.
    ///
    /// Returns the rentals that changed.
    pub async fn sweep_overdue(&self) -> Result<Vec<Rental>, AppError> {
        let now = self.clock.now();
        let today = self.clock.today();

        let mut marked = Vec::new();
        for mut rental in self.rentals.find_past_due(today).await? {
            if rental.mark_overdue(today, now) {
                self.rentals.save(&rental).await?;
                self.events
                    .publish(DomainEvent::RentalOverdue {
                        rental_id: rental.id,
                        member_id: rental.member_id,
                        days_overdue: rental.days_overdue(today),
                        occurred_at: now,
                    })
                    .await;
                marked.push(rental);
            }
        }

        metrics::counter!("rentals_marked_overdue_total").increment(marked.len() as u64);
        tracing::info!(count = marked.len(), %today, "Overdue sweep finished");
        Ok(marked)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the rental is unknown or was
    /// returned without damage.
    pub async fn damage_assessment(&self, id: RentalId) -> Result<DamageAssessment, AppError> {
        self.get(id).await?;
        self.assessments.find_by_rental(id).await?.ok_or_else(|| {
            AppError::not_found("Damage assessment not found", json!({ "rental_id": id }))
        })
    }

    async fn load_member(&self, id: MemberId) -> Result<Member, AppError> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found", json!({ "member_id": id })))
    }

    async fn load_equipment(
        &self,
        id: EquipmentId,
    ) -> Result<Equipment, AppError> {
        self.equipment.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found("Equipment not found", json!({ "equipment_id": id }))
        })
    }

    async fn charge(&self, rental: &Rental, amount: Money, kind: ChargeKind) -> Result<(), AppError> {
        if amount.is_zero() {
            return Ok(());
        }
        let receipt = self
            .payments
            .charge(PaymentRequest {
                member_id: rental.member_id,
                rental_id: rental.id,
                amount,
                kind,
            })
            .await?;
        tracing::debug!(rental_id = %rental.id, transaction_id = %receipt.transaction_id, ?kind, "Charged");
        Ok(())
    }

    async fn publish_activated(&self, rental: &Rental) {
        self.events
            .publish(DomainEvent::RentalActivated {
                rental_id: rental.id,
                member_id: rental.member_id,
                occurred_at: rental.updated_at,
            })
            .await;
    }
}

fn unavailable(equipment_id: &EquipmentId, period: &DateRange) -> AppError {
    DomainError::EquipmentUnavailable {
        equipment_id: equipment_id.to_string(),
        start: period.start(),
        end: period.end(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewEquipment, NewMember, RentalStatus};
    use crate::domain::events::EventKind;
    use crate::domain::ports::{FixedClock, MockPaymentService, PaymentReceipt};
    use crate::domain::value_objects::MembershipTier;
    use crate::infrastructure::events::RecordingEventPublisher;
    use crate::infrastructure::memory::memory_repositories;
    use crate::infrastructure::payment::SimulatedPaymentService;
    use chrono::Utc;
    use uuid::Uuid;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
    }

    fn period(start: u32, end: u32) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    struct Fixture {
        repos: Repositories,
        events: Arc<RecordingEventPublisher>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                repos: memory_repositories(),
                events: Arc::new(RecordingEventPublisher::new()),
            }
        }

        fn service_with(&self, day: u32, payments: Arc<dyn PaymentService>) -> RentalService {
            let availability = Arc::new(AvailabilityService::new(
                self.repos.rentals.clone(),
                self.repos.reservations.clone(),
            ));
            RentalService::new(
                &self.repos,
                availability,
                payments,
                self.events.clone(),
                Arc::new(FixedClock::on(d(day))),
            )
        }

        /// Service whose clock reads 2026-05-`day`.
        fn service(&self, day: u32) -> RentalService {
            self.service_with(day, Arc::new(SimulatedPaymentService))
        }

        async fn equipment(&self, condition: EquipmentCondition) -> Equipment {
            let equipment = Equipment::register(
                NewEquipment {
                    name: "Cordless Drill".to_string(),
                    description: None,
                    category: "tools".to_string(),
                    serial_number: None,
                    daily_rate: Money::from_dollars(10),
                    condition,
                },
                Utc::now(),
            )
            .unwrap();
            self.repos.equipment.save(&equipment).await.unwrap();
            equipment
        }

        async fn member(&self, tier: MembershipTier) -> Member {
            let member = Member::register(
                NewMember {
                    name: "Ada".to_string(),
                    email: format!("{}@example.com", Uuid::new_v4().simple()),
                    tier,
                },
                Utc::now(),
            )
            .unwrap();
            self.repos.members.save(&member).await.unwrap();
            member
        }

        async fn checkout(
            &self,
            today: u32,
            equipment: &Equipment,
            member: &Member,
            period: DateRange,
        ) -> Result<Rental, AppError> {
            self.service(today)
                .checkout(Checkout {
                    equipment_id: equipment.id,
                    member_id: member.id,
                    period,
                })
                .await
        }

        async fn stored_equipment(&self, id: EquipmentId) -> Equipment {
            self.repos.equipment.find_by_id(id).await.unwrap().unwrap()
        }

        async fn stored_member(&self, id: MemberId) -> Member {
            self.repos.members.find_by_id(id).await.unwrap().unwrap()
        }
    }

    #[tokio::test]
    async fn test_checkout_starting_today_is_active() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Silver).await;

        let rental = f.checkout(1, &equipment, &member, period(1, 3)).await.unwrap();

        assert_eq!(rental.status, RentalStatus::Active);
        // 3 days at $10 less 5%
        assert_eq!(rental.total_cost, Money::from_cents(2850).unwrap());

        let stored = f.stored_equipment(equipment.id).await;
        assert!(!stored.is_available);
        assert_eq!(stored.current_rental_id, Some(rental.id));
        assert_eq!(f.stored_member(member.id).await.active_rentals, 1);
        assert_eq!(
            f.events.kinds(),
            vec![EventKind::RentalCreated, EventKind::RentalActivated]
        );
    }

    #[tokio::test]
    async fn test_future_checkout_stays_pending() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;

        let rental = f.checkout(1, &equipment, &member, period(5, 6)).await.unwrap();

        assert_eq!(rental.status, RentalStatus::Pending);
        assert!(f.stored_equipment(equipment.id).await.is_available);
        assert_eq!(f.events.kinds(), vec![EventKind::RentalCreated]);

        let activated = f.service(5).activate(rental.id).await.unwrap();
        assert_eq!(activated.status, RentalStatus::Active);
        assert!(!f.stored_equipment(equipment.id).await.is_available);
    }

    #[tokio::test]
    async fn test_checkout_rejects_past_start() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;

        let err = f
            .checkout(5, &equipment, &member, period(4, 6))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_checkout_respects_tier_length() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;

        let err = f
            .checkout(1, &equipment, &member, period(1, 8))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "RENTAL_NOT_ALLOWED");

        assert!(f.checkout(1, &equipment, &member, period(1, 7)).await.is_ok());
    }

    #[tokio::test]
    async fn test_checkout_respects_concurrent_limit() {
        let f = Fixture::new();
        let member = f.member(MembershipTier::Basic).await;
        for _ in 0..2 {
            let equipment = f.equipment(EquipmentCondition::Good).await;
            f.checkout(1, &equipment, &member, period(2, 3)).await.unwrap();
        }

        let third = f.equipment(EquipmentCondition::Good).await;
        let err = f
            .checkout(1, &third, &member, period(2, 3))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "RENTAL_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_shared_boundary_day_conflicts() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let first = f.member(MembershipTier::Gold).await;
        let second = f.member(MembershipTier::Gold).await;

        f.checkout(1, &equipment, &first, period(10, 12)).await.unwrap();

        let err = f
            .checkout(1, &equipment, &second, period(12, 14))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "EQUIPMENT_UNAVAILABLE");

        assert!(f.checkout(1, &equipment, &second, period(13, 14)).await.is_ok());
    }

    #[tokio::test]
    async fn test_overdue_rental_blocks_checkout() {
        let f = Fixture::new();
        let drill = f.equipment(EquipmentCondition::Good).await;
        let saw = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Gold).await;

        let rental = f.checkout(1, &drill, &member, period(1, 2)).await.unwrap();

        let err = f.checkout(4, &saw, &member, period(4, 5)).await.unwrap_err();
        assert_eq!(err.code(), "RENTAL_OVERDUE");

        f.service(4)
            .return_rental(rental.id, EquipmentCondition::Good, None)
            .await
            .unwrap();
        assert!(f.checkout(4, &saw, &member, period(4, 5)).await.is_ok());
    }

    #[tokio::test]
    async fn test_return_with_damage() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;
        let rental = f.checkout(1, &equipment, &member, period(1, 2)).await.unwrap();

        let service = f.service(2);
        let outcome = service
            .return_rental(rental.id, EquipmentCondition::Damaged, Some("bent chuck".to_string()))
            .await
            .unwrap();

        assert_eq!(outcome.rental.status, RentalStatus::Returned);
        assert_eq!(outcome.rental.late_fee, Money::ZERO);
        assert_eq!(outcome.rental.damage_fee, Money::from_dollars(300));
        let assessment = outcome.assessment.unwrap();
        assert_eq!(assessment.condition_before, EquipmentCondition::Good);
        assert_eq!(assessment.condition_after, EquipmentCondition::Damaged);

        let stored = service.damage_assessment(rental.id).await.unwrap();
        assert_eq!(stored.id, assessment.id);

        let equipment = f.stored_equipment(equipment.id).await;
        assert_eq!(equipment.condition, EquipmentCondition::Damaged);
        assert!(!equipment.is_available);
        assert_eq!(equipment.current_rental_id, None);
        assert_eq!(f.stored_member(member.id).await.active_rentals, 0);

        let kinds = f.events.kinds();
        assert!(kinds.ends_with(&[EventKind::RentalReturned, EventKind::DamageAssessed]));

        let err = service
            .return_rental(rental.id, EquipmentCondition::Damaged, None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ALREADY_RETURNED");
    }

    #[tokio::test]
    async fn test_late_return_charges_late_fee() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;
        let rental = f.checkout(1, &equipment, &member, period(1, 2)).await.unwrap();

        let outcome = f
            .service(4)
            .return_rental(rental.id, EquipmentCondition::Good, None)
            .await
            .unwrap();

        // two late days at 150% of $10
        assert_eq!(outcome.rental.late_fee, Money::from_dollars(30));
        assert!(outcome.assessment.is_none());
        assert_eq!(
            f.service(4).damage_assessment(rental.id).await.unwrap_err().code(),
            "NOT_FOUND"
        );
    }

    #[tokio::test]
    async fn test_sweep_then_cancel_overdue_fails() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;
        let rental = f.checkout(1, &equipment, &member, period(1, 2)).await.unwrap();

        let service = f.service(5);
        assert_eq!(service.overdue().await.unwrap().len(), 1);

        let marked = service.sweep_overdue().await.unwrap();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].status, RentalStatus::Overdue);
        assert!(service.sweep_overdue().await.unwrap().is_empty());
        assert_eq!(
            f.events.kinds().last(),
            Some(&EventKind::RentalOverdue)
        );

        let err = service.cancel(rental.id).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE");
    }

    #[tokio::test]
    async fn test_cancel_frees_equipment() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;
        let rental = f.checkout(1, &equipment, &member, period(1, 2)).await.unwrap();

        let cancelled = f.service(1).cancel(rental.id).await.unwrap();

        assert_eq!(cancelled.status, RentalStatus::Cancelled);
        assert!(f.stored_equipment(equipment.id).await.is_available);
        assert_eq!(f.stored_member(member.id).await.active_rentals, 0);

        let err = f.service(1).cancel(rental.id).await.unwrap_err();
        assert_eq!(err.code(), "ALREADY_CANCELLED");
    }

    #[tokio::test]
    async fn test_extend_charges_difference() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;
        let rental = f.checkout(1, &equipment, &member, period(1, 2)).await.unwrap();

        let mut payments = MockPaymentService::new();
        payments
            .expect_charge()
            .withf(|req| req.amount == Money::from_dollars(20) && req.kind == ChargeKind::RentalFee)
            .times(1)
            .returning(|req| {
                Ok(PaymentReceipt {
                    transaction_id: Uuid::new_v4(),
                    amount: req.amount,
                    charged_at: Utc::now(),
                })
            });

        let extended = f
            .service_with(1, Arc::new(payments))
            .extend(rental.id, d(4))
            .await
            .unwrap();

        assert_eq!(extended.period.end(), d(4));
        assert_eq!(extended.total_cost, Money::from_dollars(40));
    }

    #[tokio::test]
    async fn test_extend_blocked_by_next_booking() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let first = f.member(MembershipTier::Basic).await;
        let second = f.member(MembershipTier::Basic).await;
        let rental = f.checkout(1, &equipment, &first, period(1, 2)).await.unwrap();
        f.checkout(1, &equipment, &second, period(4, 5)).await.unwrap();

        let err = f.service(1).extend(rental.id, d(4)).await.unwrap_err();
        assert_eq!(err.code(), "EQUIPMENT_UNAVAILABLE");

        let unchanged = f.service(1).get(rental.id).await.unwrap();
        assert_eq!(unchanged.period.end(), d(2));
    }

    #[tokio::test]
    async fn test_failed_payment_stores_nothing() {
        let f = Fixture::new();
        let equipment = f.equipment(EquipmentCondition::Good).await;
        let member = f.member(MembershipTier::Basic).await;

        let mut payments = MockPaymentService::new();
        payments
            .expect_charge()
            .returning(|_| Err(AppError::internal("card declined", json!({}))));

        let err = f
            .service_with(1, Arc::new(payments))
            .checkout(Checkout {
                equipment_id: equipment.id,
                member_id: member.id,
                period: period(1, 2),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(f.stored_equipment(equipment.id).await.is_available);
        assert_eq!(f.stored_member(member.id).await.active_rentals, 0);
        assert!(f.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_rental() {
        let f = Fixture::new();
        let err = f.service(1).get(RentalId::new()).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
