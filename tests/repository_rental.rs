mod common;

use common::fixtures;
use equipment_rental::domain::entities::{
    DamageAssessment, Equipment, NewRental, NewReservation, Rental, RentalStatus, Reservation,
    ReservationStatus,
};
use equipment_rental::domain::repositories::{RentalFilter, ReservationFilter};
use equipment_rental::domain::value_objects::{
    DateRange, EquipmentCondition, MemberId, MembershipTier,
};
use equipment_rental::infrastructure::persistence::pg_repositories;
use sqlx::PgPool;
use std::sync::Arc;

fn rental(equipment: &Equipment, member_id: MemberId, start: u32, end: u32) -> Rental {
    Rental::create(
        NewRental {
            equipment_id: equipment.id,
            member_id,
            reservation_id: None,
            period: DateRange::new(fixtures::date(start), fixtures::date(end)).unwrap(),
            daily_rate: equipment.daily_rate,
            tier: MembershipTier::Silver,
        },
        fixtures::now(),
    )
}

#[sqlx::test]
async fn test_rental_round_trip(pool: PgPool) {
    let repos = pg_repositories(Arc::new(pool));
    let (equipment, member) = fixtures::seed(&repos, "rt@example.com").await;
    let rental = rental(&equipment, member.id, 1, 3);

    repos.rentals.save(&rental).await.unwrap();

    let found = repos.rentals.find_by_id(rental.id).await.unwrap();
    assert_eq!(found, Some(rental));
}

#[sqlx::test]
async fn test_blocking_and_open_queries(pool: PgPool) {
    let repos = pg_repositories(Arc::new(pool));
    let (equipment, member) = fixtures::seed(&repos, "block@example.com").await;

    let pending = rental(&equipment, member.id, 1, 2);
    let mut cancelled = rental(&equipment, member.id, 5, 6);
    cancelled.cancel(fixtures::now()).unwrap();
    repos.rentals.save(&pending).await.unwrap();
    repos.rentals.save(&cancelled).await.unwrap();

    let blocking = repos.rentals.find_blocking(equipment.id).await.unwrap();
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0].id, pending.id);

    let open = repos.rentals.find_open_by_member(member.id).await.unwrap();
    assert_eq!(open.len(), 1);

    let filter = RentalFilter {
        status: Some(RentalStatus::Cancelled),
        ..RentalFilter::for_member(member.id)
    };
    assert_eq!(repos.rentals.count(&filter).await.unwrap(), 1);
}

#[sqlx::test]
async fn test_find_past_due(pool: PgPool) {
    let repos = pg_repositories(Arc::new(pool));
    let (equipment, member) = fixtures::seed(&repos, "late@example.com").await;

    let mut late = rental(&equipment, member.id, 1, 2);
    late.activate(fixtures::now()).unwrap();
    let mut current = rental(&equipment, member.id, 4, 9);
    current.activate(fixtures::now()).unwrap();
    repos.rentals.save(&late).await.unwrap();
    repos.rentals.save(&current).await.unwrap();

    let past_due = repos.rentals.find_past_due(fixtures::date(5)).await.unwrap();

    assert_eq!(past_due.len(), 1);
    assert_eq!(past_due[0].id, late.id);
}

#[sqlx::test]
async fn test_damage_assessment_round_trip(pool: PgPool) {
    let repos = pg_repositories(Arc::new(pool));
    let (equipment, member) = fixtures::seed(&repos, "dmg@example.com").await;

    let mut rental = rental(&equipment, member.id, 1, 2);
    rental.activate(fixtures::now()).unwrap();
    rental
        .return_equipment(fixtures::date(2), fixtures::now())
        .unwrap();
    repos.rentals.save(&rental).await.unwrap();

    let assessment = DamageAssessment::assess(
        &rental,
        EquipmentCondition::Good,
        EquipmentCondition::Poor,
        Some("scratched".to_string()),
        fixtures::now(),
    )
    .unwrap()
    .unwrap();
    repos.assessments.create(&assessment).await.unwrap();

    let found = repos.assessments.find_by_rental(rental.id).await.unwrap();
    assert_eq!(found, Some(assessment));
}

#[sqlx::test]
async fn test_reservation_round_trip_and_blocking(pool: PgPool) {
    let repos = pg_repositories(Arc::new(pool));
    let (equipment, member) = fixtures::seed(&repos, "res@example.com").await;

    let mut reservation = Reservation::create(
        NewReservation {
            equipment_id: equipment.id,
            member_id: member.id,
            period: DateRange::new(fixtures::date(10), fixtures::date(12)).unwrap(),
            notes: Some("weekend".to_string()),
        },
        fixtures::date(1),
        fixtures::now(),
    )
    .unwrap();
    repos.reservations.save(&reservation).await.unwrap();

    reservation.confirm(fixtures::now()).unwrap();
    repos.reservations.save(&reservation).await.unwrap();

    let found = repos.reservations.find_by_id(reservation.id).await.unwrap();
    assert_eq!(found, Some(reservation.clone()));

    let blocking = repos.reservations.find_blocking(equipment.id).await.unwrap();
    assert_eq!(blocking.len(), 1);

    let filter = ReservationFilter {
        status: Some(ReservationStatus::Confirmed),
        ..ReservationFilter::default()
    };
    let listed = repos.reservations.list(&filter, 0, 10).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, reservation.id);
}
