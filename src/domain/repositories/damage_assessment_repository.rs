//! Repository trait for damage assessments.

use async_trait::async_trait;

use crate::domain::entities::DamageAssessment;
use crate::domain::value_objects::RentalId;
use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DamageAssessmentRepository: Send + Sync {
    /// Stores a new assessment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the rental already has one.
    async fn create(&self, assessment: &DamageAssessment) -> Result<(), AppError>;

    async fn find_by_rental(&self, rental_id: RentalId)
    -> Result<Option<DamageAssessment>, AppError>;
}
