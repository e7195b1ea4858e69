//! Blood request endpoints, including the staff disposition workflow

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        inventory::BloodUnit,
        request::{BloodRequest, CreateRequest, Disposition, RequestQuery},
    },
};

use super::{AuthenticatedUser, PaginatedRequests, PaginatedResponse};

/// Submit a new blood request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request submitted", body = BloodRequest),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<BloodRequest>)> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let created = state
        .services
        .requests
        .create(claims.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List requests with search and filters (staff)
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses(
        (status = 200, description = "List of requests", body = PaginatedRequests),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<PaginatedResponse<BloodRequest>>> {
    claims.require_staff()?;

    let (requests, total) = state.services.requests.list(&query).await?;

    Ok(Json(PaginatedResponse {
        items: requests,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(8),
    }))
}

/// Get request details (staff)
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = BloodRequest),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BloodRequest>> {
    claims.require_staff()?;

    let request = state.services.requests.get(id).await?;
    Ok(Json(request))
}

/// Units eligible for assignment to this request (staff).
/// AVAILABLE units matching the patient's blood group, plus the
/// currently assigned unit if any.
#[utoipa::path(
    get,
    path = "/requests/{id}/candidate-units",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Eligible units", body = Vec<BloodUnit>),
        (status = 404, description = "Request not found")
    )
)]
pub async fn candidate_units(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<BloodUnit>>> {
    claims.require_staff()?;

    let units = state.services.requests.candidate_units(id).await?;
    Ok(Json(units))
}

/// Apply a disposition to a request (staff).
///
/// Approving reserves the chosen unit, completing distributes it, and
/// rejecting or resetting to pending releases whatever was held.
#[utoipa::path(
    put,
    path = "/requests/{id}/disposition",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = Disposition,
    responses(
        (status = 200, description = "Disposition applied", body = BloodRequest),
        (status = 400, description = "Unit required or blood group mismatch"),
        (status = 404, description = "Request or unit not found"),
        (status = 409, description = "Unit changed status concurrently"),
        (status = 422, description = "Transition not allowed")
    )
)]
pub async fn dispose_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(disposition): Json<Disposition>,
) -> AppResult<Json<BloodRequest>> {
    claims.require_staff()?;

    let updated = state
        .services
        .requests
        .dispose(id, claims.user_id, disposition)
        .await?;
    Ok(Json(updated))
}
