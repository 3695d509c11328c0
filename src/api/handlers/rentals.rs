//! Handlers for rental endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::pagination::ListResponse;
use crate::api::dto::rentals::{
    CheckoutRequest, DamageAssessmentResponse, ExtendRentalRequest, OverdueResponse,
    RentalListQuery, RentalResponse, ReturnRentalRequest, ReturnResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Checks out equipment to a member.
///
/// # Endpoint
///
/// `POST /api/rentals`
///
/// # Behavior
///
/// A rental starting today is `ACTIVE` at once; a later start is `PENDING`
/// until activated. The rental total is charged at checkout.
///
/// # Errors
///
/// - 400 for a reversed period or a start date in the past
/// - 404 for an unknown member or equipment
/// - 409 `EQUIPMENT_UNAVAILABLE` when the period overlaps another booking
/// - 422 `RENTAL_NOT_ALLOWED` / `RENTAL_OVERDUE` when the member may not rent
#[utoipa::path(
    post,
    path = "/api/rentals",
    tag = "rentals",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Rental created", body = RentalResponse),
        (status = 400, description = "Invalid period"),
        (status = 404, description = "Member or equipment not found"),
        (status = 409, description = "Equipment unavailable"),
        (status = 422, description = "Member may not rent")
    )
)]
pub async fn checkout_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<RentalResponse>), AppError> {
    let rental = state
        .rental_service
        .checkout(payload.into_checkout()?)
        .await?;

    Ok((StatusCode::CREATED, Json(rental.into())))
}

#[utoipa::path(
    get,
    path = "/api/rentals",
    tag = "rentals",
    params(
        ("member_id" = Option<Uuid>, Query, description = "Filter by member"),
        ("equipment_id" = Option<Uuid>, Query, description = "Filter by equipment"),
        ("status" = Option<String>, Query, description = "PENDING, ACTIVE, OVERDUE, RETURNED or CANCELLED"),
        ("page" = Option<u32>, Query, description = "Page number, from 1"),
        ("page_size" = Option<u32>, Query, description = "Items per page, 10 to 1000")
    ),
    responses(
        (status = 200, description = "Rental page", body = ListResponse<RentalResponse>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn list_rentals_handler(
    State(state): State<AppState>,
    Query(query): Query<RentalListQuery>,
) -> Result<Json<ListResponse<RentalResponse>>, AppError> {
    let (offset, limit) = query.pagination.offset_limit()?;
    let filter = query.filter()?;

    let (items, total) = state.rental_service.list(&filter, offset, limit).await?;

    Ok(Json(ListResponse::new(items, &query.pagination, total)))
}

/// Rentals past their end date as of today.
///
/// # Endpoint
///
/// `GET /api/rentals/overdue`
///
/// Includes `ACTIVE` rentals the sweep has not marked yet.
#[utoipa::path(
    get,
    path = "/api/rentals/overdue",
    tag = "rentals",
    responses(
        (status = 200, description = "Overdue rentals", body = OverdueResponse)
    )
)]
pub async fn overdue_rentals_handler(
    State(state): State<AppState>,
) -> Result<Json<OverdueResponse>, AppError> {
    let rentals = state.rental_service.overdue().await?;
    Ok(Json(OverdueResponse::new(rentals, state.clock.today())))
}

/// Marks every `ACTIVE` rental past its end date as `OVERDUE`.
///
/// # Endpoint
///
/// `POST /api/rentals/overdue/sweep`
///
/// Returns only the rentals changed by this sweep.
#[utoipa::path(
    post,
    path = "/api/rentals/overdue/sweep",
    tag = "rentals",
    responses(
        (status = 200, description = "Rentals marked overdue", body = OverdueResponse)
    )
)]
pub async fn sweep_overdue_handler(
    State(state): State<AppState>,
) -> Result<Json<OverdueResponse>, AppError> {
    let rentals = state.rental_service.sweep_overdue().await?;
    Ok(Json(OverdueResponse::new(rentals, state.clock.today())))
}

#[utoipa::path(
    get,
    path = "/api/rentals/{id}",
    tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Rental", body = RentalResponse),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn get_rental_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<RentalResponse>, AppError> {
    let rental = state.rental_service.get(id.into()).await?;
    Ok(Json(rental.into()))
}

/// Hands over the equipment for a `PENDING` rental.
///
/// # Endpoint
///
/// `POST /api/rentals/{id}/activate`
#[utoipa::path(
    post,
    path = "/api/rentals/{id}/activate",
    tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Rental activated", body = RentalResponse),
        (status = 404, description = "Rental not found"),
        (status = 409, description = "Rental is not pending or equipment is out")
    )
)]
pub async fn activate_rental_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<RentalResponse>, AppError> {
    let rental = state.rental_service.activate(id.into()).await?;
    Ok(Json(rental.into()))
}

/// Moves the end date of an `ACTIVE` rental later.
///
/// # Endpoint
///
/// `POST /api/rentals/{id}/extend`
///
/// The price difference is charged immediately.
#[utoipa::path(
    post,
    path = "/api/rentals/{id}/extend",
    tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental id")),
    request_body = ExtendRentalRequest,
    responses(
        (status = 200, description = "Rental extended", body = RentalResponse),
        (status = 400, description = "New end date is not after the current one"),
        (status = 404, description = "Rental not found"),
        (status = 409, description = "Rental not active or equipment booked"),
        (status = 422, description = "Period exceeds the tier limit")
    )
)]
pub async fn extend_rental_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<ExtendRentalRequest>,
) -> Result<Json<RentalResponse>, AppError> {
    let rental = state
        .rental_service
        .extend(id.into(), payload.new_end_date)
        .await?;
    Ok(Json(rental.into()))
}

/// Takes the equipment back.
///
/// # Endpoint
///
/// `POST /api/rentals/{id}/return`
///
/// # Request Body
///
/// ```json
/// { "condition": "FAIR", "notes": "scratched casing" }
/// ```
///
/// Late and damage fees are computed and charged; a damage assessment is
/// included when the condition degraded.
#[utoipa::path(
    post,
    path = "/api/rentals/{id}/return",
    tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental id")),
    request_body = ReturnRentalRequest,
    responses(
        (status = 200, description = "Rental returned", body = ReturnResponse),
        (status = 400, description = "Unknown condition"),
        (status = 404, description = "Rental not found"),
        (status = 409, description = "Rental already returned, cancelled or pending")
    )
)]
pub async fn return_rental_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<ReturnRentalRequest>,
) -> Result<Json<ReturnResponse>, AppError> {
    payload.validate()?;
    let condition = payload.condition()?;

    let outcome = state
        .rental_service
        .return_rental(id.into(), condition, payload.notes)
        .await?;

    Ok(Json(outcome.into()))
}

/// Cancels a `PENDING` or `ACTIVE` rental.
///
/// # Endpoint
///
/// `POST /api/rentals/{id}/cancel`
#[utoipa::path(
    post,
    path = "/api/rentals/{id}/cancel",
    tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Rental cancelled", body = RentalResponse),
        (status = 404, description = "Rental not found"),
        (status = 409, description = "Rental overdue, returned or already cancelled")
    )
)]
pub async fn cancel_rental_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<RentalResponse>, AppError> {
    let rental = state.rental_service.cancel(id.into()).await?;
    Ok(Json(rental.into()))
}

#[utoipa::path(
    get,
    path = "/api/rentals/{id}/damage-assessment",
    tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Damage assessment", body = DamageAssessmentResponse),
        (status = 404, description = "Rental not found or returned undamaged")
    )
)]
pub async fn damage_assessment_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<DamageAssessmentResponse>, AppError> {
    let assessment = state.rental_service.damage_assessment(id.into()).await?;
    Ok(Json(assessment.into()))
}
