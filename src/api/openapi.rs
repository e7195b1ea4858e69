//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, campaigns, donors, health, inventory, requests, stats, volunteers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lingap API",
        version = "1.0.0",
        description = "Blood Bank Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Lingap Team")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        auth::update_profile,
        // Donors
        donors::list_donors,
        donors::get_donor,
        donors::create_donor,
        donors::update_donor,
        donors::delete_donor,
        donors::get_own_profile,
        donors::create_own_profile,
        donors::get_own_history,
        // Campaigns
        campaigns::list_campaigns,
        campaigns::get_campaign,
        campaigns::create_campaign,
        campaigns::update_campaign,
        campaigns::delete_campaign,
        campaigns::join_campaign,
        campaigns::record_donation,
        // Inventory
        inventory::list_units,
        inventory::get_unit,
        inventory::create_unit,
        inventory::update_unit,
        inventory::delete_unit,
        // Requests
        requests::create_request,
        requests::list_requests,
        requests::get_request,
        requests::candidate_units,
        requests::dispose_request,
        // Volunteers
        volunteers::list_volunteers,
        volunteers::create_volunteer,
        volunteers::update_volunteer,
        volunteers::delete_volunteer,
        // Stats
        stats::dashboard,
        stats::admin_dashboard,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::RegisterUser,
            crate::models::user::UpdateProfile,
            crate::models::user::CreateVolunteer,
            crate::models::user::UpdateVolunteer,
            // Enums
            crate::models::enums::BloodGroup,
            crate::models::enums::UnitStatus,
            crate::models::enums::RequestStatus,
            crate::models::enums::Urgency,
            crate::models::enums::Component,
            crate::models::enums::Role,
            // Donors
            crate::models::donor::Donor,
            crate::models::donor::DonorDetails,
            crate::models::donor::CreateDonorProfile,
            crate::models::donor::CreateDonor,
            crate::models::donor::UpdateDonor,
            donors::HistoryQuery,
            donors::HistoryResponse,
            // Campaigns
            crate::models::campaign::Campaign,
            crate::models::campaign::CampaignDetails,
            crate::models::campaign::Participant,
            crate::models::campaign::CampaignInput,
            crate::models::campaign::RecordDonation,
            // Inventory
            crate::models::inventory::BloodUnit,
            crate::models::inventory::UnitInput,
            // Requests
            crate::models::request::BloodRequest,
            crate::models::request::CreateRequest,
            crate::models::request::Disposition,
            // Volunteers
            volunteers::VolunteerQuery,
            // Stats
            stats::DashboardResponse,
            stats::AdminDashboardResponse,
            // Health
            health::HealthResponse,
            // Pagination wrappers
            super::PaginatedDonors,
            super::PaginatedCampaigns,
            super::PaginatedUnits,
            super::PaginatedRequests,
            super::PaginatedVolunteers,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "donors", description = "Donor management"),
        (name = "campaigns", description = "Donation campaign management"),
        (name = "inventory", description = "Blood inventory management"),
        (name = "requests", description = "Blood request workflow"),
        (name = "volunteers", description = "Volunteer account management"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn collect_refs(value: &Value, refs: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, inner) in map {
                    if key == "$ref" {
                        if let Some(target) = inner.as_str() {
                            refs.push(target.to_string());
                        }
                    } else {
                        collect_refs(inner, refs);
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    collect_refs(item, refs);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn paginated_schemas_are_registered() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        for name in [
            "PaginatedDonors",
            "PaginatedCampaigns",
            "PaginatedUnits",
            "PaginatedRequests",
            "PaginatedVolunteers",
        ] {
            assert!(schemas.get(name).is_some(), "schema {} not registered", name);
        }
    }

    #[test]
    fn every_schema_ref_resolves() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = doc["components"]["schemas"]
            .as_object()
            .expect("no schemas in document");

        let mut refs = Vec::new();
        collect_refs(&doc, &mut refs);
        assert!(!refs.is_empty());

        for target in refs {
            let name = target
                .strip_prefix("#/components/schemas/")
                .unwrap_or_else(|| panic!("unexpected ref format: {}", target));
            assert!(
                schemas.contains_key(name),
                "dangling $ref to {} in the generated document",
                name
            );
        }
    }
}
