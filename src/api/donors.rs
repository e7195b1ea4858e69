//! Donor management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        donor::{CreateDonor, CreateDonorProfile, Donor, DonorDetails, DonorQuery, UpdateDonor},
        inventory::BloodUnit,
        request::BloodRequest,
    },
};

use super::{AuthenticatedUser, PaginatedDonors, PaginatedResponse};

/// Donor history query: the two panels page independently
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HistoryQuery {
    pub d_page: Option<i64>,
    pub r_page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Donor history response
#[derive(Serialize, ToSchema)]
pub struct HistoryResponse {
    pub donations: Vec<BloodUnit>,
    pub donations_total: i64,
    pub requests: Vec<BloodRequest>,
    pub requests_total: i64,
}

/// List donors with search and pagination
#[utoipa::path(
    get,
    path = "/donors",
    tag = "donors",
    security(("bearer_auth" = [])),
    params(DonorQuery),
    responses(
        (status = 200, description = "List of donors", body = PaginatedDonors),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_donors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<DonorQuery>,
) -> AppResult<Json<PaginatedResponse<DonorDetails>>> {
    claims.require_staff()?;

    let (donors, total) = state.services.donors.list(&query).await?;

    Ok(Json(PaginatedResponse {
        items: donors,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(8),
    }))
}

/// Get donor details
#[utoipa::path(
    get,
    path = "/donors/{id}",
    tag = "donors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Donor ID")),
    responses(
        (status = 200, description = "Donor details", body = DonorDetails),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn get_donor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<DonorDetails>> {
    claims.require_staff()?;

    let donor = state.services.donors.get(id).await?;
    Ok(Json(donor))
}

/// Create a donor account with profile (staff)
#[utoipa::path(
    post,
    path = "/donors",
    tag = "donors",
    security(("bearer_auth" = [])),
    request_body = CreateDonor,
    responses(
        (status = 201, description = "Donor created", body = DonorDetails),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_donor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateDonor>,
) -> AppResult<(StatusCode, Json<DonorDetails>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let donor = state.services.donors.create(request).await?;
    Ok((StatusCode::CREATED, Json(donor)))
}

/// Update a donor (staff)
#[utoipa::path(
    put,
    path = "/donors/{id}",
    tag = "donors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Donor ID")),
    request_body = UpdateDonor,
    responses(
        (status = 200, description = "Donor updated", body = DonorDetails),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn update_donor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateDonor>,
) -> AppResult<Json<DonorDetails>> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let donor = state.services.donors.update(id, request).await?;
    Ok(Json(donor))
}

/// Delete a donor (staff)
#[utoipa::path(
    delete,
    path = "/donors/{id}",
    tag = "donors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Donor ID")),
    responses(
        (status = 204, description = "Donor deleted"),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn delete_donor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.donors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get own donor profile
#[utoipa::path(
    get,
    path = "/donors/me",
    tag = "donors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own donor profile", body = Donor),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn get_own_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Donor>> {
    let donor = state.services.donors.get_own_profile(claims.user_id).await?;
    Ok(Json(donor))
}

/// Create own donor profile
#[utoipa::path(
    post,
    path = "/donors/me",
    tag = "donors",
    security(("bearer_auth" = [])),
    request_body = CreateDonorProfile,
    responses(
        (status = 201, description = "Profile created", body = Donor),
        (status = 409, description = "Profile already exists")
    )
)]
pub async fn create_own_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateDonorProfile>,
) -> AppResult<(StatusCode, Json<Donor>)> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let donor = state
        .services
        .donors
        .create_own_profile(claims.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(donor)))
}

/// Own donation and request history
#[utoipa::path(
    get,
    path = "/donors/me/history",
    tag = "donors",
    security(("bearer_auth" = [])),
    params(HistoryQuery),
    responses(
        (status = 200, description = "Donation and request history", body = HistoryResponse),
        (status = 404, description = "No donor profile")
    )
)]
pub async fn get_own_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    let history = state
        .services
        .donors
        .history(
            claims.user_id,
            query.d_page.unwrap_or(1),
            query.r_page.unwrap_or(1),
            query.per_page.unwrap_or(5).clamp(1, 100),
        )
        .await?;

    Ok(Json(HistoryResponse {
        donations: history.donations,
        donations_total: history.donations_total,
        requests: history.requests,
        requests_total: history.requests_total,
    }))
}
