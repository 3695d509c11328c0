//! Equipment entity: a rentable item in the inventory.

use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{EquipmentCondition, EquipmentId, Money, RentalId};

const MAX_NAME_LEN: usize = 200;

/// A piece of equipment tracked by the rental service.
///
/// `is_available` reflects physical possession: it is cleared while the item
/// is out on a rental or in maintenance. Date-based availability is decided
/// by [`crate::domain::services::availability`].
#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub serial_number: Option<String>,
    pub daily_rate: Money,
    pub condition: EquipmentCondition,
    pub is_available: bool,
    pub current_rental_id: Option<RentalId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering equipment.
#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub serial_number: Option<String>,
    pub daily_rate: Money,
    pub condition: EquipmentCondition,
}

/// Partial update of descriptive fields.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct EquipmentPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub daily_rate: Option<Money>,
}

impl Equipment {
    /// Registers a new item; it is available unless its condition forbids renting.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if name or category is blank.
    pub fn register(new: NewEquipment, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = validate_name(&new.name)?;
        let category = validate_category(&new.category)?;

        Ok(Self {
            id: EquipmentId::new(),
            name,
            description: new.description,
            category,
            serial_number: new.serial_number,
            daily_rate: new.daily_rate,
            condition: new.condition,
            is_available: new.condition.is_rentable(),
            current_rental_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_rentable(&self) -> bool {
        self.is_available && self.current_rental_id.is_none() && self.condition.is_rentable()
    }

    /// Checks that the equipment may be booked for a future period.
    ///
    /// Unlike [`Self::is_rentable`] this ignores a current rental, because
    /// future bookings are checked against rental periods instead.
    pub fn ensure_bookable(&self) -> DomainResult<()> {
        if !self.condition.is_rentable() {
            return Err(DomainError::not_allowed(format!(
                "equipment {} is in {} condition",
                self.id, self.condition
            )));
        }
        Ok(())
    }

    /// Hands the equipment over for `rental_id`.
    pub fn mark_as_rented(&mut self, rental_id: RentalId, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.is_rentable() {
            return Err(DomainError::invalid_state(
                "Equipment",
                self.id,
                self.availability_label(),
                "rent",
            ));
        }
        self.is_available = false;
        self.current_rental_id = Some(rental_id);
        self.updated_at = now;
        Ok(())
    }

    /// Takes the equipment back with the condition observed at return.
    ///
    /// It becomes available again only if that condition is rentable.
    pub fn mark_as_returned(&mut self, condition: EquipmentCondition, now: DateTime<Utc>) {
        self.current_rental_id = None;
        self.condition = condition;
        self.is_available = condition.is_rentable();
        self.updated_at = now;
    }

    /// Releases the equipment from a cancelled rental.
    ///
    /// No-op when `rental_id` does not hold the equipment.
    pub fn release(&mut self, rental_id: RentalId, now: DateTime<Utc>) {
        if self.current_rental_id == Some(rental_id) {
            self.current_rental_id = None;
            self.is_available = self.condition.is_rentable();
            self.updated_at = now;
        }
    }

    pub fn send_to_maintenance(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.current_rental_id.is_some() {
            return Err(DomainError::invalid_state(
                "Equipment",
                self.id,
                "RENTED",
                "send to maintenance",
            ));
        }
        self.condition = EquipmentCondition::UnderRepair;
        self.is_available = false;
        self.updated_at = now;
        Ok(())
    }

    pub fn complete_maintenance(
        &mut self,
        condition: EquipmentCondition,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.condition != EquipmentCondition::UnderRepair {
            return Err(DomainError::invalid_state(
                "Equipment",
                self.id,
                self.condition,
                "complete maintenance",
            ));
        }
        if !condition.is_rentable() {
            return Err(DomainError::validation(
                "condition",
                format!("equipment leaving maintenance must be rentable, got {condition}"),
            ));
        }
        self.condition = condition;
        self.is_available = true;
        self.updated_at = now;
        Ok(())
    }

    pub fn apply_patch(&mut self, patch: EquipmentPatch, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = validate_name(&name)?;
        }
        if let Some(category) = patch.category {
            self.category = validate_category(&category)?;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(rate) = patch.daily_rate {
            self.daily_rate = rate;
        }
        self.updated_at = now;
        Ok(())
    }

    fn availability_label(&self) -> &'static str {
        if self.current_rental_id.is_some() {
            "RENTED"
        } else if self.condition == EquipmentCondition::UnderRepair {
            "UNDER_REPAIR"
        } else if !self.condition.is_rentable() {
            "NOT_RENTABLE"
        } else {
            "UNAVAILABLE"
        }
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            "name",
            format!("must be 1-{MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name.to_string())
}

fn validate_category(category: &str) -> DomainResult<String> {
    let category = category.trim();
    if category.is_empty() {
        return Err(DomainError::validation("category", "must not be empty"));
    }
    Ok(category.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_equipment(condition: EquipmentCondition) -> Equipment {
        Equipment::register(
            NewEquipment {
                name: "Hammer Drill".to_string(),
                description: None,
                category: "Power Tools".to_string(),
                serial_number: Some("HD-0001".to_string()),
                daily_rate: Money::from_dollars(25),
                condition,
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_register_normalizes_category() {
        let equipment = new_equipment(EquipmentCondition::Good);
        assert_eq!(equipment.category, "power tools");
        assert!(equipment.is_available);
        assert!(equipment.is_rentable());
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let result = Equipment::register(
            NewEquipment {
                name: "  ".to_string(),
                description: None,
                category: "tools".to_string(),
                serial_number: None,
                daily_rate: Money::ZERO,
                condition: EquipmentCondition::Good,
            },
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_poor_condition_starts_unavailable() {
        let equipment = new_equipment(EquipmentCondition::Poor);
        assert!(!equipment.is_available);
        assert!(equipment.ensure_bookable().is_err());
    }

    #[test]
    fn test_rent_and_return() {
        let mut equipment = new_equipment(EquipmentCondition::Good);
        let rental = RentalId::new();

        equipment.mark_as_rented(rental, Utc::now()).unwrap();
        assert!(!equipment.is_available);
        assert_eq!(equipment.current_rental_id, Some(rental));
        assert!(equipment.mark_as_rented(RentalId::new(), Utc::now()).is_err());

        equipment.mark_as_returned(EquipmentCondition::Damaged, Utc::now());
        assert!(equipment.current_rental_id.is_none());
        assert!(!equipment.is_available);
        assert_eq!(equipment.condition, EquipmentCondition::Damaged);
    }

    #[test]
    fn test_release_only_for_holding_rental() {
        let mut equipment = new_equipment(EquipmentCondition::Good);
        let rental = RentalId::new();
        equipment.mark_as_rented(rental, Utc::now()).unwrap();

        equipment.release(RentalId::new(), Utc::now());
        assert_eq!(equipment.current_rental_id, Some(rental));

        equipment.release(rental, Utc::now());
        assert!(equipment.is_rentable());
    }

    #[test]
    fn test_maintenance_cycle() {
        let mut equipment = new_equipment(EquipmentCondition::Fair);

        equipment.send_to_maintenance(Utc::now()).unwrap();
        assert_eq!(equipment.condition, EquipmentCondition::UnderRepair);
        assert!(!equipment.is_available);

        assert!(
            equipment
                .complete_maintenance(EquipmentCondition::Poor, Utc::now())
                .is_err()
        );
        equipment
            .complete_maintenance(EquipmentCondition::Excellent, Utc::now())
            .unwrap();
        assert!(equipment.is_rentable());
    }

    #[test]
    fn test_cannot_maintain_while_rented() {
        let mut equipment = new_equipment(EquipmentCondition::Good);
        equipment.mark_as_rented(RentalId::new(), Utc::now()).unwrap();

        let err = equipment.send_to_maintenance(Utc::now()).unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE");
    }

    #[test]
    fn test_patch_clears_description() {
        let mut equipment = new_equipment(EquipmentCondition::Good);
        equipment.description = Some("old".to_string());

        equipment
            .apply_patch(
                EquipmentPatch {
                    description: Some(None),
                    daily_rate: Some(Money::from_dollars(30)),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();

        assert!(equipment.description.is_none());
        assert_eq!(equipment.daily_rate, Money::from_dollars(30));
    }
}
