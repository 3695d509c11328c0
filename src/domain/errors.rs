//! Typed failures raised by entities, value objects and domain services.
//!
//! Every variant carries a machine-readable code (see [`DomainError::code`])
//! and a JSON metadata payload (see [`DomainError::metadata`]). The HTTP layer
//! maps them to status codes in [`crate::error::AppError`].

use chrono::NaiveDate;
use serde_json::{Value, json};
use thiserror::Error;

/// Business-rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Cannot {action} {entity} {id} while it is {state}")]
    InvalidState {
        entity: &'static str,
        id: String,
        state: String,
        action: &'static str,
    },

    #[error("Rental {rental_id} has already been returned")]
    AlreadyReturned { rental_id: String },

    #[error("{entity} {id} has already been cancelled")]
    AlreadyCancelled { entity: &'static str, id: String },

    #[error("Equipment {equipment_id} is not available from {start} to {end}")]
    EquipmentUnavailable {
        equipment_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Rental not allowed: {reason}")]
    RentalNotAllowed { reason: String },

    #[error("Member {member_id} has overdue rental {rental_id}")]
    RentalOverdue { member_id: String, rental_id: String },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_state(
        entity: &'static str,
        id: impl ToString,
        state: impl ToString,
        action: &'static str,
    ) -> Self {
        Self::InvalidState {
            entity,
            id: id.to_string(),
            state: state.to_string(),
            action,
        }
    }

    pub fn not_allowed(reason: impl Into<String>) -> Self {
        Self::RentalNotAllowed {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::AlreadyReturned { .. } => "ALREADY_RETURNED",
            Self::AlreadyCancelled { .. } => "ALREADY_CANCELLED",
            Self::EquipmentUnavailable { .. } => "EQUIPMENT_UNAVAILABLE",
            Self::RentalNotAllowed { .. } => "RENTAL_NOT_ALLOWED",
            Self::RentalOverdue { .. } => "RENTAL_OVERDUE",
        }
    }

    /// Structured context describing the failure.
    pub fn metadata(&self) -> Value {
        match self {
            Self::Validation { field, .. } => json!({ "field": field }),
            Self::NotFound { entity, id } => json!({ "entity": entity, "id": id }),
            Self::InvalidState {
                entity,
                id,
                state,
                action,
            } => json!({ "entity": entity, "id": id, "state": state, "action": action }),
            Self::AlreadyReturned { rental_id } => json!({ "rental_id": rental_id }),
            Self::AlreadyCancelled { entity, id } => json!({ "entity": entity, "id": id }),
            Self::EquipmentUnavailable {
                equipment_id,
                start,
                end,
            } => json!({ "equipment_id": equipment_id, "start": start, "end": end }),
            Self::RentalNotAllowed { .. } => json!({}),
            Self::RentalOverdue {
                member_id,
                rental_id,
            } => json!({ "member_id": member_id, "rental_id": rental_id }),
        }
    }
}
