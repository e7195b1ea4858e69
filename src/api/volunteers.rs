//! Volunteer (staff account) management, superuser only

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateVolunteer, UpdateVolunteer, User, UserShort},
};

use super::{AuthenticatedUser, PaginatedResponse, PaginatedVolunteers};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct VolunteerQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// List volunteer accounts
#[utoipa::path(
    get,
    path = "/volunteers",
    tag = "volunteers",
    security(("bearer_auth" = [])),
    params(VolunteerQuery),
    responses(
        (status = 200, description = "List of volunteers", body = PaginatedVolunteers),
        (status = 403, description = "Superuser only")
    )
)]
pub async fn list_volunteers(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<VolunteerQuery>,
) -> AppResult<Json<PaginatedResponse<UserShort>>> {
    claims.require_superuser()?;

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(8);
    let (volunteers, total) = state.services.auth.list_volunteers(page, per_page).await?;

    Ok(Json(PaginatedResponse {
        items: volunteers,
        total,
        page,
        per_page,
    }))
}

/// Create a volunteer account
#[utoipa::path(
    post,
    path = "/volunteers",
    tag = "volunteers",
    security(("bearer_auth" = [])),
    request_body = CreateVolunteer,
    responses(
        (status = 201, description = "Volunteer created", body = User),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_volunteer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateVolunteer>,
) -> AppResult<(StatusCode, Json<User>)> {
    claims.require_superuser()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.services.auth.create_volunteer(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a volunteer account
#[utoipa::path(
    put,
    path = "/volunteers/{id}",
    tag = "volunteers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Volunteer user ID")),
    request_body = UpdateVolunteer,
    responses(
        (status = 200, description = "Volunteer updated", body = User),
        (status = 404, description = "Volunteer not found")
    )
)]
pub async fn update_volunteer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVolunteer>,
) -> AppResult<Json<User>> {
    claims.require_superuser()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.services.auth.update_volunteer(id, request).await?;
    Ok(Json(user))
}

/// Delete a volunteer account
#[utoipa::path(
    delete,
    path = "/volunteers/{id}",
    tag = "volunteers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Volunteer user ID")),
    responses(
        (status = 204, description = "Volunteer deleted"),
        (status = 404, description = "Volunteer not found")
    )
)]
pub async fn delete_volunteer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_superuser()?;

    state.services.auth.delete_volunteer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
