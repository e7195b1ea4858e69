//! Blood request service, including the disposition workflow

use crate::{
    error::AppResult,
    models::{
        inventory::BloodUnit,
        request::{BloodRequest, CreateRequest, Disposition, RequestQuery},
    },
    repository::Repository,
    services::disposition::plan_disposition,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Submit a new blood request (starts PENDING, no unit)
    pub async fn create(&self, requestor_id: i32, input: CreateRequest) -> AppResult<BloodRequest> {
        let request = self.repository.requests.create(requestor_id, &input).await?;
        tracing::info!(
            request_id = request.id,
            blood_group = %request.patient_blood_group,
            urgency = %request.urgency,
            "Blood request submitted"
        );
        Ok(request)
    }

    /// List requests (staff view)
    pub async fn list(&self, query: &RequestQuery) -> AppResult<(Vec<BloodRequest>, i64)> {
        self.repository.requests.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<BloodRequest> {
        self.repository.requests.get_by_id(id).await
    }

    /// Units an operator may pick for this request: AVAILABLE units of the
    /// patient's blood group, plus the currently assigned unit so editing an
    /// approved request keeps the existing choice selectable.
    pub async fn candidate_units(&self, request_id: i32) -> AppResult<Vec<BloodUnit>> {
        let request = self.repository.requests.get_by_id(request_id).await?;
        self.repository
            .inventory
            .find_candidates(request.patient_blood_group, request.assigned_unit_id)
            .await
    }

    /// Apply a staff disposition to a request.
    ///
    /// Loads the current state, computes the transition as a pure plan, and
    /// applies it atomically. Validation failures leave both the request and
    /// the inventory untouched.
    pub async fn dispose(
        &self,
        request_id: i32,
        operator_id: i32,
        disposition: Disposition,
    ) -> AppResult<BloodRequest> {
        let request = self.repository.requests.get_by_id(request_id).await?;

        let assigned = match request.assigned_unit_id {
            Some(unit_id) => Some(self.repository.inventory.get_by_id(unit_id).await?),
            None => None,
        };

        let candidate = match disposition.unit_id {
            Some(unit_id) => Some(self.repository.inventory.get_by_id(unit_id).await?),
            None => None,
        };

        let plan = plan_disposition(
            &request,
            assigned.as_ref(),
            disposition.status,
            candidate.as_ref(),
        )?;

        let updated = self
            .repository
            .requests
            .apply_disposition(request_id, &plan, operator_id)
            .await?;

        tracing::info!(
            request_id,
            operator_id,
            status = %updated.status,
            unit_id = ?updated.assigned_unit_id,
            "Request disposition applied"
        );

        Ok(updated)
    }
}
