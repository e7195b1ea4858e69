//! Blood inventory unit model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{BloodGroup, UnitStatus};

/// Inventory unit from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BloodUnit {
    pub id: i32,
    pub serial_number: String,
    pub donor_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub blood_group: BloodGroup,
    pub status: UnitStatus,
    pub date_collected: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub processed_by: Option<i32>,
}

/// Manual intake / staff edit of an inventory unit
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UnitInput {
    #[validate(length(min = 1, max = 50, message = "Serial number must be 1-50 characters"))]
    pub serial_number: String,
    /// Optional source donor; anonymous/external intake when absent
    pub donor_id: Option<i32>,
    /// Required unless a donor with a registered blood group is given
    pub blood_group: Option<BloodGroup>,
    pub status: Option<UnitStatus>,
    pub date_collected: Option<DateTime<Utc>>,
    pub expiry_date: DateTime<Utc>,
}

/// Inventory list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UnitQuery {
    /// Search in serial number
    pub q: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub status: Option<UnitStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
