//! Donor profile model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::BloodGroup;

/// Donor profile from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Donor {
    pub id: i32,
    pub user_id: i32,
    pub blood_group: Option<BloodGroup>,
    pub contact_no: String,
    pub address: String,
}

/// Donor with account details for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DonorDetails {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub contact_no: String,
    pub address: String,
    pub donation_count: i64,
}

/// Create/update own donor profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDonorProfile {
    /// Optional: donors may not know their blood type
    pub blood_group: Option<BloodGroup>,
    #[validate(length(min = 7, max = 15, message = "Contact number must be 7-15 characters"))]
    pub contact_no: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Staff-side donor creation: account plus profile in one step
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDonor {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub blood_group: BloodGroup,
    #[validate(length(min = 7, max = 15, message = "Contact number must be 7-15 characters"))]
    pub contact_no: String,
    pub address: String,
}

/// Staff-side donor update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDonor {
    pub blood_group: Option<BloodGroup>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Donor list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DonorQuery {
    /// Search in name or username
    pub q: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
