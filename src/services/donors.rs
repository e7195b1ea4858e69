//! Donor management service

use crate::{
    error::{AppError, AppResult},
    models::{
        donor::{CreateDonor, CreateDonorProfile, Donor, DonorDetails, DonorQuery, UpdateDonor},
        enums::Role,
        inventory::BloodUnit,
        request::BloodRequest,
    },
    repository::Repository,
    services::auth::AuthService,
};

/// Donor history page: donations and requests are paginated independently,
/// the way the two panels are browsed side by side.
pub struct DonorHistory {
    pub donations: Vec<BloodUnit>,
    pub donations_total: i64,
    pub requests: Vec<BloodRequest>,
    pub requests_total: i64,
}

#[derive(Clone)]
pub struct DonorsService {
    repository: Repository,
}

impl DonorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List donors (staff view)
    pub async fn list(&self, query: &DonorQuery) -> AppResult<(Vec<DonorDetails>, i64)> {
        self.repository.donors.list(query).await
    }

    /// Get donor details by donor ID
    pub async fn get(&self, id: i32) -> AppResult<DonorDetails> {
        self.repository.donors.get_details(id).await
    }

    /// Get the donor profile belonging to a user, if one exists
    pub async fn get_own_profile(&self, user_id: i32) -> AppResult<Donor> {
        self.repository
            .donors
            .get_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No donor profile for this account".to_string()))
    }

    /// Create the authenticated user's own donor profile
    pub async fn create_own_profile(
        &self,
        user_id: i32,
        input: CreateDonorProfile,
    ) -> AppResult<Donor> {
        // Name/email on the profile form also update the account
        if input.firstname.is_some() || input.lastname.is_some() || input.email.is_some() {
            self.repository
                .users
                .update_profile(
                    user_id,
                    input.firstname.as_deref(),
                    input.lastname.as_deref(),
                    input.email.as_deref(),
                )
                .await?;
        }

        self.repository
            .donors
            .create(user_id, input.blood_group, &input.contact_no, &input.address)
            .await
    }

    /// Staff-side creation: donor account plus profile in one step
    pub async fn create(&self, input: CreateDonor) -> AppResult<DonorDetails> {
        let hash = AuthService::hash_password(&input.password)?;

        let user = self
            .repository
            .users
            .create(
                &input.username,
                &hash,
                Some(&input.firstname),
                Some(&input.lastname),
                input.email.as_deref(),
                Role::Donor,
            )
            .await?;

        let donor = self
            .repository
            .donors
            .create(
                user.id,
                Some(input.blood_group),
                &input.contact_no,
                &input.address,
            )
            .await?;

        self.repository.donors.get_details(donor.id).await
    }

    /// Staff-side update of a donor
    pub async fn update(&self, id: i32, input: UpdateDonor) -> AppResult<DonorDetails> {
        let donor = self
            .repository
            .donors
            .update(
                id,
                input.blood_group,
                input.contact_no.as_deref(),
                input.address.as_deref(),
            )
            .await?;

        if input.firstname.is_some() || input.lastname.is_some() || input.email.is_some() {
            self.repository
                .users
                .update_profile(
                    donor.user_id,
                    input.firstname.as_deref(),
                    input.lastname.as_deref(),
                    input.email.as_deref(),
                )
                .await?;
        }

        self.repository.donors.get_details(id).await
    }

    /// Delete a donor (account and profile)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.donors.delete(id).await
    }

    /// Donation and request history for the authenticated donor
    pub async fn history(
        &self,
        user_id: i32,
        donations_page: i64,
        requests_page: i64,
        per_page: i64,
    ) -> AppResult<DonorHistory> {
        let donor = self.get_own_profile(user_id).await?;

        let (donations, donations_total) = self
            .repository
            .inventory
            .list_for_donor(donor.id, donations_page.max(1), per_page)
            .await?;

        let (requests, requests_total) = self
            .repository
            .requests
            .list_for_requestor(user_id, requests_page.max(1), per_page)
            .await?;

        Ok(DonorHistory {
            donations,
            donations_total,
            requests,
            requests_total,
        })
    }
}
