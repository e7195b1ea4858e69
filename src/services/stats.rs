//! Dashboard statistics service

use chrono::Utc;

use crate::{error::AppResult, models::inventory::BloodUnit, repository::Repository};

/// Red Cross dashboard counters
pub struct DashboardStats {
    pub pending_requests: i64,
    pub available_units: i64,
    pub active_campaigns: i64,
    pub recent_donations: Vec<BloodUnit>,
}

/// Superuser dashboard adds population totals
pub struct AdminStats {
    pub pending_requests: i64,
    pub available_units: i64,
    pub active_campaigns: i64,
    pub total_donors: i64,
    pub total_volunteers: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            pending_requests: self.repository.requests.count_pending().await?,
            available_units: self.repository.inventory.count_available().await?,
            active_campaigns: self.repository.campaigns.count_active(Utc::now()).await?,
            recent_donations: self.repository.inventory.recent(5).await?,
        })
    }

    pub async fn admin_dashboard(&self) -> AppResult<AdminStats> {
        Ok(AdminStats {
            pending_requests: self.repository.requests.count_pending().await?,
            available_units: self.repository.inventory.count_available().await?,
            active_campaigns: self.repository.campaigns.count_active(Utc::now()).await?,
            total_donors: self.repository.donors.count().await?,
            total_volunteers: self.repository.users.count_volunteers().await?,
        })
    }
}
