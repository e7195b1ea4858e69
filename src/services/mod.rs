//! Business logic services

pub mod auth;
pub mod campaigns;
pub mod disposition;
pub mod donors;
pub mod inventory;
pub mod requests;
pub mod stats;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub donors: donors::DonorsService,
    pub campaigns: campaigns::CampaignsService,
    pub inventory: inventory::InventoryService,
    pub requests: requests::RequestsService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            donors: donors::DonorsService::new(repository.clone()),
            campaigns: campaigns::CampaignsService::new(repository.clone()),
            inventory: inventory::InventoryService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping_database(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await?;
        Ok(())
    }
}
