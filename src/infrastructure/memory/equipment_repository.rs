//! In-memory equipment repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::paginate;
use crate::domain::entities::Equipment;
use crate::domain::repositories::{EquipmentFilter, EquipmentRepository};
use crate::domain::value_objects::EquipmentId;
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryEquipmentRepository {
    items: RwLock<HashMap<EquipmentId, Equipment>>,
}

impl InMemoryEquipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(equipment: &Equipment, filter: &EquipmentFilter) -> bool {
    let category_ok = filter
        .category
        .as_ref()
        .is_none_or(|c| equipment.category.eq_ignore_ascii_case(c.trim()));
    let available_ok = filter.available.is_none_or(|a| equipment.is_available == a);
    category_ok && available_ok
}

#[async_trait]
impl EquipmentRepository for InMemoryEquipmentRepository {
    async fn save(&self, equipment: &Equipment) -> Result<(), AppError> {
        let mut items = self.items.write().await;
        if let Some(serial) = &equipment.serial_number {
            let taken = items
                .values()
                .any(|e| e.id != equipment.id && e.serial_number.as_ref() == Some(serial));
            if taken {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "idx_equipment_serial_number" }),
                ));
            }
        }
        items.insert(equipment.id, equipment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EquipmentId) -> Result<Option<Equipment>, AppError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &EquipmentFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Equipment>, AppError> {
        let mut items: Vec<Equipment> = self
            .items
            .read()
            .await
            .values()
            .filter(|e| matches(e, filter))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(paginate(items, offset, limit))
    }

    async fn count(&self, filter: &EquipmentFilter) -> Result<i64, AppError> {
        let items = self.items.read().await;
        Ok(items.values().filter(|e| matches(e, filter)).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewEquipment;
    use crate::domain::value_objects::{EquipmentCondition, Money};
    use chrono::Utc;

    fn item(name: &str, category: &str, serial: Option<&str>) -> Equipment {
        Equipment::register(
            NewEquipment {
                name: name.to_string(),
                description: None,
                category: category.to_string(),
                serial_number: serial.map(str::to_string),
                daily_rate: Money::from_dollars(5),
                condition: EquipmentCondition::Good,
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_serial_conflicts() {
        let repo = InMemoryEquipmentRepository::new();
        repo.save(&item("Ladder", "access", Some("L-1"))).await.unwrap();

        let result = repo.save(&item("Other Ladder", "access", Some("L-1"))).await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let repo = InMemoryEquipmentRepository::new();
        repo.save(&item("Sander", "tools", None)).await.unwrap();
        repo.save(&item("Auger", "tools", None)).await.unwrap();
        repo.save(&item("Scaffold", "access", None)).await.unwrap();

        let filter = EquipmentFilter {
            category: Some("TOOLS".to_string()),
            available: None,
        };
        let names: Vec<String> = repo
            .list(&filter, 0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(names, vec!["Auger", "Sander"]);
        assert_eq!(repo.count(&filter).await.unwrap(), 2);
        assert_eq!(repo.count(&EquipmentFilter::default()).await.unwrap(), 3);
    }
}
