//! Campaign management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        campaign::{Campaign, CampaignDetails, CampaignInput, RecordDonation},
        enums::UnitStatus,
        inventory::BloodUnit,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CampaignsService {
    repository: Repository,
}

impl CampaignsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Staff see every campaign; donors only see upcoming ones.
    pub async fn list(
        &self,
        staff_view: bool,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<Campaign>, i64)> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);
        if staff_view {
            self.repository.campaigns.list_all(page, per_page).await
        } else {
            self.repository.campaigns.list_upcoming(page, per_page).await
        }
    }

    /// Campaign with its participant roster and donation tally
    pub async fn get_details(&self, id: i32) -> AppResult<CampaignDetails> {
        let campaign = self.repository.campaigns.get_by_id(id).await?;
        let participants = self.repository.campaigns.get_participants(id).await?;

        let total_participants = participants.len() as i64;
        let donated_count = participants.iter().filter(|p| p.has_donated).count() as i64;

        Ok(CampaignDetails {
            campaign,
            total_participants,
            donated_count,
            participants,
        })
    }

    pub async fn create(&self, input: CampaignInput) -> AppResult<Campaign> {
        validate_dates(&input)?;
        self.repository.campaigns.create(&input).await
    }

    pub async fn update(&self, id: i32, input: CampaignInput) -> AppResult<Campaign> {
        validate_dates(&input)?;
        self.repository.campaigns.update(id, &input).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.campaigns.delete(id).await
    }

    /// Register the authenticated donor for a campaign
    pub async fn join(&self, campaign_id: i32, user_id: i32) -> AppResult<Campaign> {
        let campaign = self.repository.campaigns.get_by_id(campaign_id).await?;

        if !campaign.is_active(Utc::now()) {
            return Err(AppError::BusinessRule(
                "This campaign has already ended".to_string(),
            ));
        }

        let donor = self
            .repository
            .donors
            .get_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::BusinessRule("Complete your donor profile before joining".to_string())
            })?;

        self.repository.campaigns.join(campaign_id, donor.id).await?;
        Ok(campaign)
    }

    /// Record a donation made by a donor at a campaign: creates an AVAILABLE
    /// inventory unit and marks the participant as having donated. The unit's
    /// blood group falls back to the donor's registered one.
    pub async fn record_donation(
        &self,
        campaign_id: i32,
        donor_id: i32,
        operator_id: i32,
        input: RecordDonation,
    ) -> AppResult<BloodUnit> {
        let campaign = self.repository.campaigns.get_by_id(campaign_id).await?;
        let donor = self.repository.donors.get_by_id(donor_id).await?;

        let blood_group = input
            .blood_group
            .or(donor.blood_group)
            .ok_or_else(|| {
                AppError::validation(
                    "blood_group",
                    "Donor has no registered blood group; specify one",
                )
            })?;

        let unit = self
            .repository
            .inventory
            .create(
                &input.serial_number,
                Some(donor.id),
                Some(campaign.id),
                blood_group,
                UnitStatus::Available,
                Utc::now(),
                input.expiry_date,
                operator_id,
            )
            .await?;

        self.repository
            .campaigns
            .mark_donated(campaign.id, donor.id)
            .await?;

        tracing::info!(
            unit_id = unit.id,
            campaign_id,
            donor_id,
            "Donation recorded"
        );

        Ok(unit)
    }
}

fn validate_dates(input: &CampaignInput) -> AppResult<()> {
    if input.end_datetime <= input.start_datetime {
        return Err(AppError::validation(
            "end_datetime",
            "End of campaign must be after its start",
        ));
    }
    Ok(())
}
