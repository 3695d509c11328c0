//! Row structs mapping tables to entities.
//!
//! Enums are stored as their `SCREAMING_SNAKE_CASE` text and money as cents.
//! Reading a row that violates an entity invariant is an internal error.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::entities::{DamageAssessment, Equipment, Member, Rental, Reservation};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{DateRange, Money};
use crate::error::AppError;

fn corrupt(table: &'static str, id: Uuid, e: impl std::fmt::Display) -> AppError {
    tracing::error!(table, %id, error = %e, "Stored row violates domain invariants");
    AppError::internal("Corrupt stored data", json!({ "table": table, "id": id }))
}

#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub serial_number: Option<String>,
    pub daily_rate_cents: i64,
    pub condition: String,
    pub is_available: bool,
    pub current_rental_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Equipment> for EquipmentRow {
    fn from(e: &Equipment) -> Self {
        Self {
            id: e.id.into(),
            name: e.name.clone(),
            description: e.description.clone(),
            category: e.category.clone(),
            serial_number: e.serial_number.clone(),
            daily_rate_cents: e.daily_rate.cents(),
            condition: e.condition.as_str().to_string(),
            is_available: e.is_available,
            current_rental_id: e.current_rental_id.map(Into::into),
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl TryFrom<EquipmentRow> for Equipment {
    type Error = AppError;

    fn try_from(row: EquipmentRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let parse = || -> Result<Equipment, DomainError> {
            Ok(Equipment {
                id: row.id.into(),
                name: row.name,
                description: row.description,
                category: row.category,
                serial_number: row.serial_number,
                daily_rate: Money::from_cents(row.daily_rate_cents)?,
                condition: row.condition.parse()?,
                is_available: row.is_available,
                current_rental_id: row.current_rental_id.map(Into::into),
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        };
        parse().map_err(|e| corrupt("equipment", id, e))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub membership_tier: String,
    pub active_rentals: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Member> for MemberRow {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.into(),
            name: m.name.clone(),
            email: m.email.clone(),
            membership_tier: m.tier.as_str().to_string(),
            active_rentals: i32::try_from(m.active_rentals).unwrap_or(i32::MAX),
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl TryFrom<MemberRow> for Member {
    type Error = AppError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let tier = row
            .membership_tier
            .parse()
            .map_err(|e| corrupt("members", id, e))?;
        let active_rentals =
            u32::try_from(row.active_rentals).map_err(|e| corrupt("members", id, e))?;

        Ok(Member {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            tier,
            active_rentals,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RentalRow {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub member_id: Uuid,
    pub reservation_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub daily_rate_cents: i64,
    pub discount_percent: i16,
    pub total_cost_cents: i64,
    pub late_fee_cents: i64,
    pub damage_fee_cents: i64,
    pub returned_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Rental> for RentalRow {
    fn from(r: &Rental) -> Self {
        Self {
            id: r.id.into(),
            equipment_id: r.equipment_id.into(),
            member_id: r.member_id.into(),
            reservation_id: r.reservation_id.map(Into::into),
            start_date: r.period.start(),
            end_date: r.period.end(),
            status: r.status.as_str().to_string(),
            daily_rate_cents: r.daily_rate.cents(),
            discount_percent: i16::from(r.discount_percent),
            total_cost_cents: r.total_cost.cents(),
            late_fee_cents: r.late_fee.cents(),
            damage_fee_cents: r.damage_fee.cents(),
            returned_on: r.returned_on,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl TryFrom<RentalRow> for Rental {
    type Error = AppError;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let discount_percent =
            u8::try_from(row.discount_percent).map_err(|e| corrupt("rentals", id, e))?;
        let parse = || -> Result<Rental, DomainError> {
            Ok(Rental {
                id: row.id.into(),
                equipment_id: row.equipment_id.into(),
                member_id: row.member_id.into(),
                reservation_id: row.reservation_id.map(Into::into),
                period: DateRange::new(row.start_date, row.end_date)?,
                status: row.status.parse()?,
                daily_rate: Money::from_cents(row.daily_rate_cents)?,
                discount_percent,
                total_cost: Money::from_cents(row.total_cost_cents)?,
                late_fee: Money::from_cents(row.late_fee_cents)?,
                damage_fee: Money::from_cents(row.damage_fee_cents)?,
                returned_on: row.returned_on,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        };
        parse().map_err(|e| corrupt("rentals", id, e))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ReservationRow {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub member_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub rental_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.into(),
            equipment_id: r.equipment_id.into(),
            member_id: r.member_id.into(),
            start_date: r.period.start(),
            end_date: r.period.end(),
            status: r.status.as_str().to_string(),
            rental_id: r.rental_id.map(Into::into),
            notes: r.notes.clone(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let parse = || -> Result<Reservation, DomainError> {
            Ok(Reservation {
                id: row.id.into(),
                equipment_id: row.equipment_id.into(),
                member_id: row.member_id.into(),
                period: DateRange::new(row.start_date, row.end_date)?,
                status: row.status.parse()?,
                rental_id: row.rental_id.map(Into::into),
                notes: row.notes,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        };
        parse().map_err(|e| corrupt("reservations", id, e))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DamageAssessmentRow {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub equipment_id: Uuid,
    pub condition_before: String,
    pub condition_after: String,
    pub damage_fee_cents: i64,
    pub notes: Option<String>,
    pub assessed_at: DateTime<Utc>,
}

impl From<&DamageAssessment> for DamageAssessmentRow {
    fn from(a: &DamageAssessment) -> Self {
        Self {
            id: a.id.into(),
            rental_id: a.rental_id.into(),
            equipment_id: a.equipment_id.into(),
            condition_before: a.condition_before.as_str().to_string(),
            condition_after: a.condition_after.as_str().to_string(),
            damage_fee_cents: a.damage_fee.cents(),
            notes: a.notes.clone(),
            assessed_at: a.assessed_at,
        }
    }
}

impl TryFrom<DamageAssessmentRow> for DamageAssessment {
    type Error = AppError;

    fn try_from(row: DamageAssessmentRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let parse = || -> Result<DamageAssessment, DomainError> {
            Ok(DamageAssessment {
                id: row.id.into(),
                rental_id: row.rental_id.into(),
                equipment_id: row.equipment_id.into(),
                condition_before: row.condition_before.parse()?,
                condition_after: row.condition_after.parse()?,
                damage_fee: Money::from_cents(row.damage_fee_cents)?,
                notes: row.notes,
                assessed_at: row.assessed_at,
            })
        };
        parse().map_err(|e| corrupt("damage_assessments", id, e))
    }
}
