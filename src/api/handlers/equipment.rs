//! Handlers for equipment inventory endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::equipment::{
    AvailabilityResponse, AvailableEquipmentQuery, CompleteMaintenanceRequest,
    EquipmentListQuery, EquipmentResponse, RegisterEquipmentRequest, UpdateEquipmentRequest,
};
use crate::api::dto::pagination::{ListResponse, PeriodParams};
use crate::domain::value_objects::{DateRange, EquipmentCondition};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new piece of equipment.
///
/// # Endpoint
///
/// `POST /api/equipment`
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the serial number is already registered.
#[utoipa::path(
    post,
    path = "/api/equipment",
    tag = "equipment",
    request_body = RegisterEquipmentRequest,
    responses(
        (status = 201, description = "Equipment registered", body = EquipmentResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Serial number already registered")
    )
)]
pub async fn register_equipment_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterEquipmentRequest>,
) -> Result<(StatusCode, Json<EquipmentResponse>), AppError> {
    payload.validate()?;

    let equipment = state
        .equipment_service
        .register(payload.into_new_equipment()?)
        .await?;

    Ok((StatusCode::CREATED, Json(equipment.into())))
}

/// Lists equipment, optionally filtered by category and availability flag.
///
/// # Endpoint
///
/// `GET /api/equipment?category=tools&available=true&page=1&page_size=25`
#[utoipa::path(
    get,
    path = "/api/equipment",
    tag = "equipment",
    params(
        ("category" = Option<String>, Query, description = "Case-insensitive category"),
        ("available" = Option<bool>, Query, description = "Availability flag"),
        ("page" = Option<u32>, Query, description = "Page number, from 1"),
        ("page_size" = Option<u32>, Query, description = "Items per page, 10 to 1000")
    ),
    responses(
        (status = 200, description = "Equipment page", body = ListResponse<EquipmentResponse>)
    )
)]
pub async fn list_equipment_handler(
    State(state): State<AppState>,
    Query(query): Query<EquipmentListQuery>,
) -> Result<Json<ListResponse<EquipmentResponse>>, AppError> {
    let (offset, limit) = query.pagination.offset_limit()?;

    let (items, total) = state
        .equipment_service
        .list(&query.filter(), offset, limit)
        .await?;

    Ok(Json(ListResponse::new(items, &query.pagination, total)))
}

/// Lists equipment that can be rented for the whole period.
///
/// # Endpoint
///
/// `GET /api/equipment/available?start=2026-06-01&end=2026-06-03&category=tools`
///
/// Excludes items flagged unavailable, in non-rentable condition, or with
/// an overlapping rental or reservation.
#[utoipa::path(
    get,
    path = "/api/equipment/available",
    tag = "equipment",
    params(
        ("start" = String, Query, description = "First day, YYYY-MM-DD"),
        ("end" = String, Query, description = "Last day, inclusive"),
        ("category" = Option<String>, Query, description = "Case-insensitive category")
    ),
    responses(
        (status = 200, description = "Free equipment", body = Vec<EquipmentResponse>),
        (status = 400, description = "Invalid period")
    )
)]
pub async fn available_equipment_handler(
    State(state): State<AppState>,
    Query(query): Query<AvailableEquipmentQuery>,
) -> Result<Json<Vec<EquipmentResponse>>, AppError> {
    let period = DateRange::new(query.start, query.end)?;

    let items = state
        .equipment_service
        .list_available(&period, query.category)
        .await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/equipment/{id}",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment id")),
    responses(
        (status = 200, description = "Equipment", body = EquipmentResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<EquipmentResponse>, AppError> {
    let equipment = state.equipment_service.get(id.into()).await?;
    Ok(Json(equipment.into()))
}

/// Partially updates descriptive fields and the daily rate.
///
/// # Endpoint
///
/// `PATCH /api/equipment/{id}`
///
/// Existing rentals keep the rate captured at checkout.
#[utoipa::path(
    patch,
    path = "/api/equipment/{id}",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment id")),
    request_body = UpdateEquipmentRequest,
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateEquipmentRequest>,
) -> Result<Json<EquipmentResponse>, AppError> {
    payload.validate()?;

    let equipment = state
        .equipment_service
        .update(id.into(), payload.into_patch()?)
        .await?;

    Ok(Json(equipment.into()))
}

/// Checks whether one item is free for a period.
///
/// # Endpoint
///
/// `GET /api/equipment/{id}/availability?start=2026-06-01&end=2026-06-03`
#[utoipa::path(
    get,
    path = "/api/equipment/{id}/availability",
    tag = "equipment",
    params(
        ("id" = Uuid, Path, description = "Equipment id"),
        ("start" = String, Query, description = "First day, YYYY-MM-DD"),
        ("end" = String, Query, description = "Last day, inclusive")
    ),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn equipment_availability_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Query(period): Query<PeriodParams>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let range = period.to_range()?;
    let available = state
        .equipment_service
        .is_available(id.into(), &range)
        .await?;

    Ok(Json(AvailabilityResponse {
        equipment_id: id,
        start: range.start(),
        end: range.end(),
        available,
    }))
}

/// Takes an item out of service.
///
/// # Endpoint
///
/// `POST /api/equipment/{id}/maintenance`
///
/// # Errors
///
/// Returns 409 Conflict while the item is out on a rental.
#[utoipa::path(
    post,
    path = "/api/equipment/{id}/maintenance",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment id")),
    responses(
        (status = 200, description = "Equipment under repair", body = EquipmentResponse),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment is rented")
    )
)]
pub async fn send_to_maintenance_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<EquipmentResponse>, AppError> {
    let equipment = state.equipment_service.send_to_maintenance(id.into()).await?;
    Ok(Json(equipment.into()))
}

/// Returns an item from maintenance in a rentable condition.
///
/// # Endpoint
///
/// `POST /api/equipment/{id}/maintenance/complete`
#[utoipa::path(
    post,
    path = "/api/equipment/{id}/maintenance/complete",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment id")),
    request_body = CompleteMaintenanceRequest,
    responses(
        (status = 200, description = "Equipment back in service", body = EquipmentResponse),
        (status = 400, description = "Condition is not rentable"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment is not under repair")
    )
)]
pub async fn complete_maintenance_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<CompleteMaintenanceRequest>,
) -> Result<Json<EquipmentResponse>, AppError> {
    let condition: EquipmentCondition = payload.condition.parse()?;

    let equipment = state
        .equipment_service
        .complete_maintenance(id.into(), condition)
        .await?;

    Ok(Json(equipment.into()))
}
