//! Blood request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{BloodGroup, Component, RequestStatus, UnitStatus, Urgency};

/// Blood request from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BloodRequest {
    pub id: i32,
    pub requestor_id: Option<i32>,
    pub assigned_unit_id: Option<i32>,
    pub patient_name: String,
    pub patient_blood_group: BloodGroup,
    pub hospital_name: String,
    pub hospital_address: String,
    pub physician_name: String,
    pub physician_license: String,
    pub component: Component,
    pub quantity: i32,
    pub urgency: Urgency,
    pub reason: String,
    pub status: RequestStatus,
    pub request_date: DateTime<Utc>,
    pub processed_by: Option<i32>,
}

/// Create blood request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, max = 150, message = "Patient name must be 1-150 characters"))]
    pub patient_name: String,
    pub patient_blood_group: BloodGroup,
    #[validate(length(min = 1, max = 200, message = "Hospital name must be 1-200 characters"))]
    pub hospital_name: String,
    #[validate(length(min = 1, message = "Hospital address is required"))]
    pub hospital_address: String,
    #[validate(length(min = 1, max = 150, message = "Physician name must be 1-150 characters"))]
    pub physician_name: String,
    #[validate(length(min = 1, max = 50, message = "Physician license must be 1-50 characters"))]
    pub physician_license: String,
    pub component: Option<Component>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    pub urgency: Option<Urgency>,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

/// Disposition payload: the operator-chosen target status and candidate unit
#[derive(Debug, Deserialize, ToSchema)]
pub struct Disposition {
    pub status: RequestStatus,
    /// Candidate unit; required when approving, optional otherwise
    pub unit_id: Option<i32>,
}

/// One compare-and-set status change on an inventory unit.
/// `from` is the expected current status; the update must not apply if the
/// unit has moved since the plan was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitAction {
    pub unit_id: i32,
    pub from: UnitStatus,
    pub to: UnitStatus,
}

/// Computed outcome of a disposition: the request's new status, the new
/// assigned-unit link, and the unit status changes to apply with it.
/// Applied atomically as one unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispositionPlan {
    pub new_status: RequestStatus,
    pub assigned_unit_id: Option<i32>,
    pub actions: Vec<UnitAction>,
}

/// Request list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RequestQuery {
    /// Search in patient, hospital or physician name
    pub q: Option<String>,
    pub status: Option<RequestStatus>,
    pub urgency: Option<Urgency>,
    pub blood_group: Option<BloodGroup>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
