//! DTOs for equipment endpoints.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::{Equipment, EquipmentPatch, NewEquipment};
use crate::domain::repositories::EquipmentFilter;
use crate::domain::value_objects::{EquipmentCondition, Money};
use crate::error::AppError;

/// Letters, digits and inner dashes, e.g. `DRL-2024-0042`.
static SERIAL_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+(-[A-Za-z0-9]+)*$").unwrap());

/// Request body for `POST /api/equipment`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterEquipmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    #[validate(length(min = 3, max = 64))]
    #[validate(regex(path = "*SERIAL_NUMBER_REGEX", message = "Invalid serial number format"))]
    pub serial_number: Option<String>,

    /// Daily rate in cents.
    #[validate(range(min = 0))]
    pub daily_rate_cents: i64,

    /// Defaults to `EXCELLENT`.
    #[schema(example = "GOOD")]
    pub condition: Option<String>,
}

impl RegisterEquipmentRequest {
    pub fn into_new_equipment(self) -> Result<NewEquipment, AppError> {
        let condition = match self.condition.as_deref() {
            Some(raw) => raw.parse::<EquipmentCondition>()?,
            None => EquipmentCondition::Excellent,
        };

        Ok(NewEquipment {
            name: self.name,
            description: self.description,
            category: self.category,
            serial_number: self.serial_number,
            daily_rate: Money::from_cents(self.daily_rate_cents)?,
            condition,
        })
    }
}

/// Request body for `PATCH /api/equipment/{id}`.
///
/// Absent fields are left unchanged; `"description": null` clears the
/// description.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    #[validate(range(min = 0))]
    pub daily_rate_cents: Option<i64>,
}

impl UpdateEquipmentRequest {
    pub fn into_patch(self) -> Result<EquipmentPatch, AppError> {
        let daily_rate = self.daily_rate_cents.map(Money::from_cents).transpose()?;
        Ok(EquipmentPatch {
            name: self.name,
            description: self.description,
            category: self.category,
            daily_rate,
        })
    }
}

/// Request body for `POST /api/equipment/{id}/maintenance/complete`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteMaintenanceRequest {
    #[schema(example = "GOOD")]
    pub condition: String,
}

/// Query for `GET /api/equipment`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct EquipmentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    pub category: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub available: Option<bool>,
}

impl EquipmentListQuery {
    pub fn filter(&self) -> EquipmentFilter {
        EquipmentFilter {
            category: self.category.clone(),
            available: self.available,
        }
    }
}

/// Query for `GET /api/equipment/available`.
#[derive(Debug, Deserialize)]
pub struct AvailableEquipmentQuery {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub serial_number: Option<String>,
    pub daily_rate_cents: i64,
    #[schema(example = "GOOD")]
    pub condition: String,
    pub is_available: bool,
    pub current_rental_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Equipment> for EquipmentResponse {
    fn from(e: Equipment) -> Self {
        Self {
            id: e.id.as_uuid(),
            name: e.name,
            description: e.description,
            category: e.category,
            serial_number: e.serial_number,
            daily_rate_cents: e.daily_rate.cents(),
            condition: e.condition.to_string(),
            is_available: e.is_available,
            current_rental_id: e.current_rental_id.map(|id| id.as_uuid()),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Response for `GET /api/equipment/{id}/availability`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    pub equipment_id: Uuid,
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
    pub available: bool,
}
