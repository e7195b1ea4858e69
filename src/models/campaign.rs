//! Donation campaign model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::BloodGroup;

/// Campaign from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Campaign {
    pub id: i32,
    pub title: String,
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// A campaign is active until its end date has passed.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.end_datetime >= now
    }
}

/// Campaign participant with donor details for the roster view
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub id: i32,
    pub donor_id: i32,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub joined_at: DateTime<Utc>,
    pub has_donated: bool,
}

/// Campaign with participation summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CampaignDetails {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub total_participants: i64,
    pub donated_count: i64,
    pub participants: Vec<Participant>,
}

/// Create/update campaign request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CampaignInput {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Campaign list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CampaignQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Record a donation for a campaign participant
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordDonation {
    #[validate(length(min = 1, max = 50, message = "Serial number must be 1-50 characters"))]
    pub serial_number: String,
    pub expiry_date: DateTime<Utc>,
    /// Defaults to the donor's registered blood group when omitted
    pub blood_group: Option<BloodGroup>,
}
