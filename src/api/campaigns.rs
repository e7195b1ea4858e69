//! Campaign management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        campaign::{Campaign, CampaignDetails, CampaignInput, CampaignQuery, RecordDonation},
        inventory::BloodUnit,
    },
};

use super::{AuthenticatedUser, PaginatedCampaigns, PaginatedResponse};

/// List campaigns. Staff see all; donors see upcoming ones only.
#[utoipa::path(
    get,
    path = "/campaigns",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(CampaignQuery),
    responses(
        (status = 200, description = "List of campaigns", body = PaginatedCampaigns)
    )
)]
pub async fn list_campaigns(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<CampaignQuery>,
) -> AppResult<Json<PaginatedResponse<Campaign>>> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(6);

    let (campaigns, total) = state
        .services
        .campaigns
        .list(claims.role.is_staff(), page, per_page)
        .await?;

    Ok(Json(PaginatedResponse {
        items: campaigns,
        total,
        page,
        per_page,
    }))
}

/// Get campaign with participant roster
#[utoipa::path(
    get,
    path = "/campaigns/{id}",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Campaign ID")),
    responses(
        (status = 200, description = "Campaign details", body = CampaignDetails),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn get_campaign(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<CampaignDetails>> {
    claims.require_staff()?;

    let details = state.services.campaigns.get_details(id).await?;
    Ok(Json(details))
}

/// Create a campaign (staff)
#[utoipa::path(
    post,
    path = "/campaigns",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    request_body = CampaignInput,
    responses(
        (status = 201, description = "Campaign created", body = Campaign),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_campaign(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CampaignInput>,
) -> AppResult<(StatusCode, Json<Campaign>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let campaign = state.services.campaigns.create(request).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Update a campaign (staff)
#[utoipa::path(
    put,
    path = "/campaigns/{id}",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Campaign ID")),
    request_body = CampaignInput,
    responses(
        (status = 200, description = "Campaign updated", body = Campaign),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn update_campaign(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CampaignInput>,
) -> AppResult<Json<Campaign>> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let campaign = state.services.campaigns.update(id, request).await?;
    Ok(Json(campaign))
}

/// Delete a campaign (staff)
#[utoipa::path(
    delete,
    path = "/campaigns/{id}",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Campaign ID")),
    responses(
        (status = 204, description = "Campaign deleted"),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn delete_campaign(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.campaigns.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Join a campaign as a donor
#[utoipa::path(
    post,
    path = "/campaigns/{id}/join",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Campaign ID")),
    responses(
        (status = 200, description = "Joined campaign", body = Campaign),
        (status = 409, description = "Already registered"),
        (status = 422, description = "Campaign ended or no donor profile")
    )
)]
pub async fn join_campaign(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Campaign>> {
    let campaign = state.services.campaigns.join(id, claims.user_id).await?;
    Ok(Json(campaign))
}

/// Record a donation for a campaign participant (staff)
#[utoipa::path(
    post,
    path = "/campaigns/{id}/donors/{donor_id}/donations",
    tag = "campaigns",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Campaign ID"),
        ("donor_id" = i32, Path, description = "Donor ID")
    ),
    request_body = RecordDonation,
    responses(
        (status = 201, description = "Donation recorded", body = BloodUnit),
        (status = 404, description = "Campaign or donor not found"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn record_donation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, donor_id)): Path<(i32, i32)>,
    Json(request): Json<RecordDonation>,
) -> AppResult<(StatusCode, Json<BloodUnit>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let unit = state
        .services
        .campaigns
        .record_donation(id, donor_id, claims.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(unit)))
}
