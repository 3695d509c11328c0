//! In-memory damage assessment repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::DamageAssessment;
use crate::domain::repositories::DamageAssessmentRepository;
use crate::domain::value_objects::RentalId;
use crate::error::AppError;

/// Assessments keyed by rental, at most one each.
#[derive(Debug, Default)]
pub struct InMemoryDamageAssessmentRepository {
    by_rental: RwLock<HashMap<RentalId, DamageAssessment>>,
}

impl InMemoryDamageAssessmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DamageAssessmentRepository for InMemoryDamageAssessmentRepository {
    async fn create(&self, assessment: &DamageAssessment) -> Result<(), AppError> {
        let mut by_rental = self.by_rental.write().await;
        if by_rental.contains_key(&assessment.rental_id) {
            return Err(AppError::conflict(
                "Damage assessment already recorded",
                json!({ "rental_id": assessment.rental_id }),
            ));
        }
        by_rental.insert(assessment.rental_id, assessment.clone());
        Ok(())
    }

    async fn find_by_rental(
        &self,
        rental_id: RentalId,
    ) -> Result<Option<DamageAssessment>, AppError> {
        Ok(self.by_rental.read().await.get(&rental_id).cloned())
    }
}
