//! DTOs for rental endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::application::services::{Checkout, ReturnOutcome};
use crate::domain::entities::{DamageAssessment, Rental, RentalStatus};
use crate::domain::repositories::RentalFilter;
use crate::domain::value_objects::{DateRange, EquipmentCondition};
use crate::error::AppError;

/// Request body for `POST /api/rentals`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub equipment_id: Uuid,
    pub member_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CheckoutRequest {
    pub fn into_checkout(self) -> Result<Checkout, AppError> {
        Ok(Checkout {
            equipment_id: self.equipment_id.into(),
            member_id: self.member_id.into(),
            period: DateRange::new(self.start_date, self.end_date)?,
        })
    }
}

/// Request body for `POST /api/rentals/{id}/extend`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtendRentalRequest {
    pub new_end_date: NaiveDate,
}

/// Request body for `POST /api/rentals/{id}/return`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReturnRentalRequest {
    /// Condition observed at return.
    #[schema(example = "GOOD")]
    pub condition: String,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl ReturnRentalRequest {
    pub fn condition(&self) -> Result<EquipmentCondition, AppError> {
        Ok(self.condition.parse()?)
    }
}

/// Query for `GET /api/rentals`.
#[derive(Debug, Deserialize)]
pub struct RentalListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    pub member_id: Option<Uuid>,
    pub equipment_id: Option<Uuid>,
    pub status: Option<String>,
}

impl RentalListQuery {
    pub fn filter(&self) -> Result<RentalFilter, AppError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<RentalStatus>)
            .transpose()?;
        Ok(RentalFilter {
            member_id: self.member_id.map(Into::into),
            equipment_id: self.equipment_id.map(Into::into),
            status,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RentalResponse {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub member_id: Uuid,
    pub reservation_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    #[schema(example = "ACTIVE")]
    pub status: String,
    pub daily_rate_cents: i64,
    pub discount_percent: u8,
    pub total_cost_cents: i64,
    pub late_fee_cents: i64,
    pub damage_fee_cents: i64,
    pub total_due_cents: i64,
    pub returned_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rental> for RentalResponse {
    fn from(r: Rental) -> Self {
        Self {
            id: r.id.as_uuid(),
            equipment_id: r.equipment_id.as_uuid(),
            member_id: r.member_id.as_uuid(),
            reservation_id: r.reservation_id.map(|id| id.as_uuid()),
            start_date: r.period.start(),
            end_date: r.period.end(),
            days: r.period.days(),
            status: r.status.to_string(),
            daily_rate_cents: r.daily_rate.cents(),
            discount_percent: r.discount_percent,
            total_cost_cents: r.total_cost.cents(),
            late_fee_cents: r.late_fee.cents(),
            damage_fee_cents: r.damage_fee.cents(),
            total_due_cents: r.total_due().cents(),
            returned_on: r.returned_on,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DamageAssessmentResponse {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub equipment_id: Uuid,
    pub condition_before: String,
    pub condition_after: String,
    pub degradation_levels: u8,
    pub damage_fee_cents: i64,
    pub notes: Option<String>,
    pub assessed_at: DateTime<Utc>,
}

impl From<DamageAssessment> for DamageAssessmentResponse {
    fn from(a: DamageAssessment) -> Self {
        Self {
            id: a.id.as_uuid(),
            rental_id: a.rental_id.as_uuid(),
            equipment_id: a.equipment_id.as_uuid(),
            condition_before: a.condition_before.to_string(),
            condition_after: a.condition_after.to_string(),
            degradation_levels: a.degradation_levels(),
            damage_fee_cents: a.damage_fee.cents(),
            notes: a.notes,
            assessed_at: a.assessed_at,
        }
    }
}

/// Response for `POST /api/rentals/{id}/return`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReturnResponse {
    pub rental: RentalResponse,
    pub damage_assessment: Option<DamageAssessmentResponse>,
}

impl From<ReturnOutcome> for ReturnResponse {
    fn from(outcome: ReturnOutcome) -> Self {
        Self {
            rental: outcome.rental.into(),
            damage_assessment: outcome.assessment.map(Into::into),
        }
    }
}

/// Response for the overdue listing and sweep.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OverdueResponse {
    pub as_of: NaiveDate,
    pub count: usize,
    pub rentals: Vec<OverdueRentalResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OverdueRentalResponse {
    #[serde(flatten)]
    pub rental: RentalResponse,
    pub days_overdue: u32,
}

impl OverdueResponse {
    pub fn new(rentals: Vec<Rental>, today: NaiveDate) -> Self {
        let rentals: Vec<OverdueRentalResponse> = rentals
            .into_iter()
            .map(|r| OverdueRentalResponse {
                days_overdue: r.days_overdue(today),
                rental: r.into(),
            })
            .collect();
        Self {
            as_of: today,
            count: rentals.len(),
            rentals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_rejects_reversed_period() {
        let req = CheckoutRequest {
            equipment_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        };
        assert_eq!(req.into_checkout().unwrap_err().code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_list_query_status_is_case_insensitive() {
        let query = RentalListQuery {
            pagination: PaginationParams::default(),
            member_id: None,
            equipment_id: None,
            status: Some("overdue".to_string()),
        };
        assert_eq!(query.filter().unwrap().status, Some(RentalStatus::Overdue));
    }

    #[test]
    fn test_list_query_rejects_unknown_status() {
        let query = RentalListQuery {
            pagination: PaginationParams::default(),
            member_id: None,
            equipment_id: None,
            status: Some("LOST".to_string()),
        };
        assert!(query.filter().is_err());
    }
}
