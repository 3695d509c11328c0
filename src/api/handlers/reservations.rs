//! Handlers for reservation endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::pagination::ListResponse;
use crate::api::dto::reservations::{
    CreateReservationRequest, FulfillResponse, ReservationListQuery, ReservationResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Books equipment for a future period.
///
/// # Endpoint
///
/// `POST /api/reservations`
///
/// The reservation starts `PENDING` and blocks the period until it is
/// cancelled or fulfilled.
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse),
        (status = 400, description = "Invalid period"),
        (status = 404, description = "Member or equipment not found"),
        (status = 409, description = "Equipment unavailable"),
        (status = 422, description = "Member may not reserve")
    )
)]
pub async fn create_reservation_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    payload.validate()?;

    let reservation = state
        .reservation_service
        .create(payload.into_new_reservation()?)
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = "reservations",
    params(
        ("member_id" = Option<Uuid>, Query, description = "Filter by member"),
        ("equipment_id" = Option<Uuid>, Query, description = "Filter by equipment"),
        ("status" = Option<String>, Query, description = "PENDING, CONFIRMED, CANCELLED or FULFILLED"),
        ("page" = Option<u32>, Query, description = "Page number, from 1"),
        ("page_size" = Option<u32>, Query, description = "Items per page, 10 to 1000")
    ),
    responses(
        (status = 200, description = "Reservation page", body = ListResponse<ReservationResponse>),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn list_reservations_handler(
    State(state): State<AppState>,
    Query(query): Query<ReservationListQuery>,
) -> Result<Json<ListResponse<ReservationResponse>>, AppError> {
    let (offset, limit) = query.pagination.offset_limit()?;
    let filter = query.filter()?;

    let (items, total) = state
        .reservation_service
        .list(&filter, offset, limit)
        .await?;

    Ok(Json(ListResponse::new(items, &query.pagination, total)))
}

#[utoipa::path(
    get,
    path = "/api/reservations/{id}",
    tag = "reservations",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation", body = ReservationResponse),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state.reservation_service.get(id.into()).await?;
    Ok(Json(reservation.into()))
}

#[utoipa::path(
    post,
    path = "/api/reservations/{id}/confirm",
    tag = "reservations",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation confirmed", body = ReservationResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation is not pending")
    )
)]
pub async fn confirm_reservation_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state.reservation_service.confirm(id.into()).await?;
    Ok(Json(reservation.into()))
}

#[utoipa::path(
    post,
    path = "/api/reservations/{id}/cancel",
    tag = "reservations",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation already cancelled or fulfilled")
    )
)]
pub async fn cancel_reservation_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state.reservation_service.cancel(id.into()).await?;
    Ok(Json(reservation.into()))
}

/// Turns a confirmed reservation into a rental.
///
/// # Endpoint
///
/// `POST /api/reservations/{id}/fulfill`
///
/// Checkout rules apply as for `POST /api/rentals`.
#[utoipa::path(
    post,
    path = "/api/reservations/{id}/fulfill",
    tag = "reservations",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation fulfilled", body = FulfillResponse),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Reservation not confirmed"),
        (status = 422, description = "Member may not rent")
    )
)]
pub async fn fulfill_reservation_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<FulfillResponse>, AppError> {
    let fulfilled = state.reservation_service.fulfill(id.into()).await?;
    Ok(Json(fulfilled.into()))
}
