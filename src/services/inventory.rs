//! Blood inventory service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::UnitStatus,
        inventory::{BloodUnit, UnitInput, UnitQuery},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &UnitQuery) -> AppResult<(Vec<BloodUnit>, i64)> {
        self.repository.inventory.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<BloodUnit> {
        self.repository.inventory.get_by_id(id).await
    }

    /// Manual intake of a unit. The blood group is inherited from the donor
    /// when not given explicitly.
    pub async fn create(&self, operator_id: i32, input: UnitInput) -> AppResult<BloodUnit> {
        let blood_group = match (input.blood_group, input.donor_id) {
            (Some(bg), _) => bg,
            (None, Some(donor_id)) => self
                .repository
                .donors
                .get_by_id(donor_id)
                .await?
                .blood_group
                .ok_or_else(|| {
                    AppError::validation(
                        "blood_group",
                        "Donor has no registered blood group; specify one",
                    )
                })?,
            (None, None) => {
                return Err(AppError::validation("blood_group", "Blood group is required"))
            }
        };

        self.repository
            .inventory
            .create(
                &input.serial_number,
                input.donor_id,
                None,
                blood_group,
                input.status.unwrap_or(UnitStatus::Available),
                input.date_collected.unwrap_or_else(Utc::now),
                input.expiry_date,
                operator_id,
            )
            .await
    }

    /// Staff edit of a unit's descriptive fields. Status edits here are for
    /// corrections (e.g. marking EXPIRED); the disposition workflow owns
    /// reserve/distribute/release transitions.
    pub async fn update(&self, id: i32, input: UnitInput) -> AppResult<BloodUnit> {
        let existing = self.repository.inventory.get_by_id(id).await?;

        self.repository
            .inventory
            .update(
                id,
                &input.serial_number,
                input.donor_id.or(existing.donor_id),
                input.blood_group.unwrap_or(existing.blood_group),
                input.status.unwrap_or(existing.status),
                input.expiry_date,
            )
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.inventory.delete(id).await
    }
}
