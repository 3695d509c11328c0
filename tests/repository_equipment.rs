mod common;

use common::fixtures;
use equipment_rental::domain::repositories::{EquipmentFilter, EquipmentRepository};
use equipment_rental::domain::value_objects::{EquipmentCondition, EquipmentId, RentalId};
use equipment_rental::infrastructure::persistence::PgEquipmentRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_save_and_find(pool: PgPool) {
    let repo = PgEquipmentRepository::new(Arc::new(pool));
    let equipment = fixtures::equipment("Hammer Drill", Some("HD-100"));

    repo.save(&equipment).await.unwrap();

    let found = repo.find_by_id(equipment.id).await.unwrap();
    assert_eq!(found, Some(equipment));
}

#[sqlx::test]
async fn test_find_missing(pool: PgPool) {
    let repo = PgEquipmentRepository::new(Arc::new(pool));

    let found = repo.find_by_id(EquipmentId::new()).await.unwrap();

    assert!(found.is_none());
}

#[sqlx::test]
async fn test_save_replaces_existing_row(pool: PgPool) {
    let repo = PgEquipmentRepository::new(Arc::new(pool));
    let mut equipment = fixtures::equipment("Saw", None);
    repo.save(&equipment).await.unwrap();

    equipment
        .mark_as_rented(RentalId::new(), fixtures::now())
        .unwrap();
    repo.save(&equipment).await.unwrap();

    let found = repo.find_by_id(equipment.id).await.unwrap().unwrap();
    assert!(!found.is_available);
    assert_eq!(found.current_rental_id, equipment.current_rental_id);
    assert_eq!(repo.count(&EquipmentFilter::default()).await.unwrap(), 1);
}

#[sqlx::test]
async fn test_duplicate_serial_conflicts(pool: PgPool) {
    let repo = PgEquipmentRepository::new(Arc::new(pool));
    repo.save(&fixtures::equipment("First", Some("SN-1")))
        .await
        .unwrap();

    let result = repo.save(&fixtures::equipment("Second", Some("SN-1"))).await;

    assert_eq!(result.unwrap_err().code(), "CONFLICT");
}

#[sqlx::test]
async fn test_list_filters(pool: PgPool) {
    let repo = PgEquipmentRepository::new(Arc::new(pool));
    let available = fixtures::equipment("Available", None);
    let mut repairing = fixtures::equipment("Repairing", None);
    repairing.send_to_maintenance(fixtures::now()).unwrap();
    repo.save(&available).await.unwrap();
    repo.save(&repairing).await.unwrap();

    let filter = EquipmentFilter {
        category: Some("TOOLS".to_string()),
        available: Some(true),
    };
    let items = repo.list(&filter, 0, 10).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, available.id);
    assert_eq!(repo.count(&filter).await.unwrap(), 1);

    let repairing_found = repo.find_by_id(repairing.id).await.unwrap().unwrap();
    assert_eq!(repairing_found.condition, EquipmentCondition::UnderRepair);
}
