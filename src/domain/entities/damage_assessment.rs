//! Damage assessment recorded when returned equipment has degraded.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Rental, RentalStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::fee_calculator;
use crate::domain::value_objects::{AssessmentId, EquipmentCondition, EquipmentId, Money, RentalId};

#[derive(Debug, Clone, PartialEq)]
pub struct DamageAssessment {
    pub id: AssessmentId,
    pub rental_id: RentalId,
    pub equipment_id: EquipmentId,
    pub condition_before: EquipmentCondition,
    pub condition_after: EquipmentCondition,
    pub damage_fee: Money,
    pub notes: Option<String>,
    pub assessed_at: DateTime<Utc>,
}

impl DamageAssessment {
    /// Assesses a returned rental.
    ///
    /// Returns `Ok(None)` when the condition did not degrade.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidState`] unless the rental is `RETURNED`.
    pub fn assess(
        rental: &Rental,
        before: EquipmentCondition,
        after: EquipmentCondition,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Self>> {
        if rental.status != RentalStatus::Returned {
            return Err(DomainError::invalid_state(
                "Rental",
                rental.id,
                rental.status,
                "assess damage for",
            ));
        }

        if after.degradation_from(before) == 0 {
            return Ok(None);
        }

        Ok(Some(Self {
            id: AssessmentId::new(),
            rental_id: rental.id,
            equipment_id: rental.equipment_id,
            condition_before: before,
            condition_after: after,
            damage_fee: fee_calculator::damage_fee(before, after),
            notes,
            assessed_at: now,
        }))
    }

    pub fn degradation_levels(&self) -> u8 {
        self.condition_after.degradation_from(self.condition_before)
    }
}
