//! Equipment intake, updates, maintenance and availability queries.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::AvailabilityService;
use crate::domain::entities::{Equipment, EquipmentPatch, NewEquipment};
use crate::domain::events::DomainEvent;
use crate::domain::ports::{Clock, EventPublisher};
use crate::domain::repositories::{EquipmentFilter, EquipmentRepository};
use crate::domain::services::Exclusions;
use crate::domain::value_objects::{DateRange, EquipmentCondition, EquipmentId};
use crate::error::AppError;

/// Batch size used when scanning the catalogue for free items.
const SCAN_BATCH: i64 = 200;

pub struct EquipmentService {
    equipment: Arc<dyn EquipmentRepository>,
    availability: Arc<AvailabilityService>,
    events: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl EquipmentService {
    pub fn new(
        equipment: Arc<dyn EquipmentRepository>,
        availability: Arc<AvailabilityService>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            equipment,
            availability,
            events,
            clock,
        }
    }

    /// Registers a new item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for blank name or category.
    /// Returns [`AppError::Conflict`] if the serial number is already registered.
    pub async fn register(&self, new: NewEquipment) -> Result<Equipment, AppError> {
        let now = self.clock.now();
        let equipment = Equipment::register(new, now)?;
        self.equipment.save(&equipment).await?;

        tracing::info!(equipment_id = %equipment.id, category = %equipment.category, "Equipment registered");
        self.events
            .publish(DomainEvent::EquipmentRegistered {
                equipment_id: equipment.id,
                occurred_at: now,
            })
            .await;

        Ok(equipment)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no item has this id.
    pub async fn get(&self, id: EquipmentId) -> Result<Equipment, AppError> {
        self.equipment
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Lists a page of items together with the total matching count.
    pub async fn list(
        &self,
        filter: &EquipmentFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Equipment>, i64), AppError> {
        let items = self.equipment.list(filter, offset, limit).await?;
        let total = self.equipment.count(filter).await?;
        Ok((items, total))
    }

    pub async fn update(&self, id: EquipmentId, patch: EquipmentPatch) -> Result<Equipment, AppError> {
        let mut equipment = self.get(id).await?;
        equipment.apply_patch(patch, self.clock.now())?;
        self.equipment.save(&equipment).await?;
        Ok(equipment)
    }

    /// Whether the item can be booked for `period`.
    ///
    /// False when its condition is not rentable or a blocking rental or
    /// reservation overlaps the period.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no item has this id.
    pub async fn is_available(&self, id: EquipmentId, period: &DateRange) -> Result<bool, AppError> {
        let equipment = self.get(id).await?;
        if equipment.ensure_bookable().is_err() {
            return Ok(false);
        }
        self.availability
            .is_available(id, period, Exclusions::none())
            .await
    }

    /// Items in rentable condition with no blocking booking overlapping `period`.
    pub async fn list_available(
        &self,
        period: &DateRange,
        category: Option<String>,
    ) -> Result<Vec<Equipment>, AppError> {
        let filter = EquipmentFilter {
            category,
            available: None,
        };

        let mut free = Vec::new();
        let mut offset = 0;
        loop {
            let batch = self.equipment.list(&filter, offset, SCAN_BATCH).await?;
            let fetched = batch.len() as i64;

            for equipment in batch.into_iter().filter(|e| e.condition.is_rentable()) {
                if self
                    .availability
                    .is_available(equipment.id, period, Exclusions::none())
                    .await?
                {
                    free.push(equipment);
                }
            }

            if fetched < SCAN_BATCH {
                break;
            }
            offset += SCAN_BATCH;
        }

        Ok(free)
    }

    /// Takes an item out of service.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] (`INVALID_STATE`) while the item is rented.
    pub async fn send_to_maintenance(&self, id: EquipmentId) -> Result<Equipment, AppError> {
        let mut equipment = self.get(id).await?;
        let now = self.clock.now();
        equipment.send_to_maintenance(now)?;
        self.equipment.save(&equipment).await?;

        tracing::info!(equipment_id = %id, "Equipment sent to maintenance");
        self.events
            .publish(DomainEvent::EquipmentSentToMaintenance {
                equipment_id: id,
                occurred_at: now,
            })
            .await;

        Ok(equipment)
    }

    pub async fn complete_maintenance(
        &self,
        id: EquipmentId,
        condition: EquipmentCondition,
    ) -> Result<Equipment, AppError> {
        let mut equipment = self.get(id).await?;
        let now = self.clock.now();
        equipment.complete_maintenance(condition, now)?;
        self.equipment.save(&equipment).await?;

        tracing::info!(equipment_id = %id, %condition, "Maintenance completed");
        self.events
            .publish(DomainEvent::MaintenanceCompleted {
                equipment_id: id,
                condition,
                occurred_at: now,
            })
            .await;

        Ok(equipment)
    }
}

fn not_found(id: EquipmentId) -> AppError {
    AppError::not_found("Equipment not found", json!({ "equipment_id": id }))
}
