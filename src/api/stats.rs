//! Dashboard statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::inventory::BloodUnit};

use super::AuthenticatedUser;

/// Staff dashboard counters
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub pending_requests: i64,
    pub available_units: i64,
    pub active_campaigns: i64,
    pub recent_donations: Vec<BloodUnit>,
}

/// Superuser dashboard counters
#[derive(Serialize, ToSchema)]
pub struct AdminDashboardResponse {
    pub pending_requests: i64,
    pub available_units: i64,
    pub active_campaigns: i64,
    pub total_donors: i64,
    pub total_volunteers: i64,
}

/// Staff dashboard
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardResponse),
        (status = 403, description = "Staff only")
    )
)]
pub async fn dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DashboardResponse>> {
    claims.require_staff()?;

    let stats = state.services.stats.dashboard().await?;
    Ok(Json(DashboardResponse {
        pending_requests: stats.pending_requests,
        available_units: stats.available_units,
        active_campaigns: stats.active_campaigns,
        recent_donations: stats.recent_donations,
    }))
}

/// Superuser dashboard
#[utoipa::path(
    get,
    path = "/stats/admin",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin dashboard counters", body = AdminDashboardResponse),
        (status = 403, description = "Superuser only")
    )
)]
pub async fn admin_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AdminDashboardResponse>> {
    claims.require_superuser()?;

    let stats = state.services.stats.admin_dashboard().await?;
    Ok(Json(AdminDashboardResponse {
        pending_requests: stats.pending_requests,
        available_units: stats.available_units,
        active_campaigns: stats.active_campaigns,
        total_donors: stats.total_donors,
        total_volunteers: stats.total_volunteers,
    }))
}
