//! Blood inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::inventory::{BloodUnit, UnitInput, UnitQuery},
};

use super::{AuthenticatedUser, PaginatedResponse, PaginatedUnits};

/// List inventory units with search and pagination
#[utoipa::path(
    get,
    path = "/inventory",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(UnitQuery),
    responses(
        (status = 200, description = "List of units", body = PaginatedUnits),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_units(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<UnitQuery>,
) -> AppResult<Json<PaginatedResponse<BloodUnit>>> {
    claims.require_staff()?;

    let (units, total) = state.services.inventory.list(&query).await?;

    Ok(Json(PaginatedResponse {
        items: units,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(8),
    }))
}

/// Get unit details
#[utoipa::path(
    get,
    path = "/inventory/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Unit details", body = BloodUnit),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn get_unit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BloodUnit>> {
    claims.require_staff()?;

    let unit = state.services.inventory.get(id).await?;
    Ok(Json(unit))
}

/// Manual intake of a unit (staff)
#[utoipa::path(
    post,
    path = "/inventory",
    tag = "inventory",
    security(("bearer_auth" = [])),
    request_body = UnitInput,
    responses(
        (status = 201, description = "Unit created", body = BloodUnit),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn create_unit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UnitInput>,
) -> AppResult<(StatusCode, Json<BloodUnit>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let unit = state.services.inventory.create(claims.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

/// Update a unit (staff)
#[utoipa::path(
    put,
    path = "/inventory/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Unit ID")),
    request_body = UnitInput,
    responses(
        (status = 200, description = "Unit updated", body = BloodUnit),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn update_unit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UnitInput>,
) -> AppResult<Json<BloodUnit>> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let unit = state.services.inventory.update(id, request).await?;
    Ok(Json(unit))
}

/// Delete a unit (staff)
#[utoipa::path(
    delete,
    path = "/inventory/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Unit ID")),
    responses(
        (status = 204, description = "Unit deleted"),
        (status = 404, description = "Unit not found")
    )
)]
pub async fn delete_unit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.inventory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
