//! Handlers for member endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::members::{ChangeTierRequest, MemberResponse, RegisterMemberRequest};
use crate::api::dto::pagination::{ListResponse, PaginationParams};
use crate::api::dto::rentals::RentalResponse;
use crate::domain::value_objects::MembershipTier;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a member.
///
/// # Endpoint
///
/// `POST /api/members`
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed email or unknown tier.
/// Returns 409 Conflict if the email is already registered.
#[utoipa::path(
    post,
    path = "/api/members",
    tag = "members",
    request_body = RegisterMemberRequest,
    responses(
        (status = 201, description = "Member registered", body = MemberResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_member_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), AppError> {
    payload.validate()?;

    let member = state
        .member_service
        .register(payload.into_new_member()?)
        .await?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

#[utoipa::path(
    get,
    path = "/api/members",
    tag = "members",
    params(
        ("page" = Option<u32>, Query, description = "Page number, from 1"),
        ("page_size" = Option<u32>, Query, description = "Items per page, 10 to 1000")
    ),
    responses(
        (status = 200, description = "Member page", body = ListResponse<MemberResponse>)
    )
)]
pub async fn list_members_handler(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ListResponse<MemberResponse>>, AppError> {
    let (offset, limit) = pagination.offset_limit()?;
    let (items, total) = state.member_service.list(offset, limit).await?;
    Ok(Json(ListResponse::new(items, &pagination, total)))
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    tag = "members",
    params(("id" = Uuid, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member", body = MemberResponse),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = state.member_service.get(id.into()).await?;
    Ok(Json(member.into()))
}

/// Moves a member to another tier.
///
/// # Endpoint
///
/// `PATCH /api/members/{id}/tier`
///
/// # Errors
///
/// Returns 422 Unprocessable Entity when the member holds more rentals than
/// the new tier allows.
#[utoipa::path(
    patch,
    path = "/api/members/{id}/tier",
    tag = "members",
    params(("id" = Uuid, Path, description = "Member id")),
    request_body = ChangeTierRequest,
    responses(
        (status = 200, description = "Tier changed", body = MemberResponse),
        (status = 400, description = "Unknown tier"),
        (status = 404, description = "Member not found"),
        (status = 422, description = "Too many active rentals for the tier")
    )
)]
pub async fn change_tier_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<ChangeTierRequest>,
) -> Result<Json<MemberResponse>, AppError> {
    let tier: MembershipTier = payload.tier.parse()?;
    let member = state.member_service.change_tier(id.into(), tier).await?;
    Ok(Json(member.into()))
}

/// Deactivates a member without rentals in progress.
///
/// # Endpoint
///
/// `POST /api/members/{id}/deactivate`
#[utoipa::path(
    post,
    path = "/api/members/{id}/deactivate",
    tag = "members",
    params(("id" = Uuid, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member deactivated", body = MemberResponse),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Member already inactive or has active rentals")
    )
)]
pub async fn deactivate_member_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = state.member_service.deactivate(id.into()).await?;
    Ok(Json(member.into()))
}

/// Lists a member's rentals, newest first.
///
/// # Endpoint
///
/// `GET /api/members/{id}/rentals`
#[utoipa::path(
    get,
    path = "/api/members/{id}/rentals",
    tag = "members",
    params(
        ("id" = Uuid, Path, description = "Member id"),
        ("page" = Option<u32>, Query, description = "Page number, from 1"),
        ("page_size" = Option<u32>, Query, description = "Items per page, 10 to 1000")
    ),
    responses(
        (status = 200, description = "Rental page", body = ListResponse<RentalResponse>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn member_rentals_handler(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ListResponse<RentalResponse>>, AppError> {
    let (offset, limit) = pagination.offset_limit()?;
    let (items, total) = state.member_service.rentals(id.into(), offset, limit).await?;
    Ok(Json(ListResponse::new(items, &pagination, total)))
}
