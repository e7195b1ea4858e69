//! Campaigns repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::campaign::{Campaign, CampaignInput, Participant},
};

#[derive(Clone)]
pub struct CampaignsRepository {
    pool: Pool<Postgres>,
}

impl CampaignsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get campaign by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Campaign> {
        sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Campaign with id {} not found", id)))
    }

    /// List all campaigns, most recent first (staff view)
    pub async fn list_all(&self, page: i64, per_page: i64) -> AppResult<(Vec<Campaign>, i64)> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            "SELECT * FROM campaigns ORDER BY start_datetime DESC LIMIT $1 OFFSET $2",
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campaigns")
            .fetch_one(&self.pool)
            .await?;

        Ok((campaigns, total))
    }

    /// List upcoming campaigns, soonest first (donor view)
    pub async fn list_upcoming(&self, page: i64, per_page: i64) -> AppResult<(Vec<Campaign>, i64)> {
        let campaigns = sqlx::query_as::<_, Campaign>(
            r#"
            SELECT * FROM campaigns
            WHERE start_datetime >= NOW()
            ORDER BY start_datetime
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE start_datetime >= NOW()")
                .fetch_one(&self.pool)
                .await?;

        Ok((campaigns, total))
    }

    /// Create a campaign
    pub async fn create(&self, input: &CampaignInput) -> AppResult<Campaign> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            INSERT INTO campaigns (title, location, start_datetime, end_datetime, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.location)
        .bind(input.start_datetime)
        .bind(input.end_datetime)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(campaign)
    }

    /// Update a campaign
    pub async fn update(&self, id: i32, input: &CampaignInput) -> AppResult<Campaign> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            UPDATE campaigns
            SET title = $1, location = $2, start_datetime = $3, end_datetime = $4, description = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.location)
        .bind(input.start_datetime)
        .bind(input.end_datetime)
        .bind(&input.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Campaign with id {} not found", id)))?;

        Ok(campaign)
    }

    /// Delete a campaign
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Campaign with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Get the participant roster for a campaign
    pub async fn get_participants(&self, campaign_id: i32) -> AppResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT p.id, p.donor_id, u.firstname, u.lastname, d.blood_group,
                   p.joined_at, p.has_donated
            FROM campaign_participants p
            JOIN donors d ON p.donor_id = d.id
            JOIN users u ON d.user_id = u.id
            WHERE p.campaign_id = $1
            ORDER BY p.joined_at
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Register a donor for a campaign. Joining twice is a conflict.
    pub async fn join(&self, campaign_id: i32, donor_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO campaign_participants (campaign_id, donor_id)
            VALUES ($1, $2)
            ON CONFLICT (campaign_id, donor_id) DO NOTHING
            "#,
        )
        .bind(campaign_id)
        .bind(donor_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Already registered for this campaign".to_string(),
            ));
        }
        Ok(())
    }

    /// Flag a participant as having donated at this campaign
    pub async fn mark_donated(&self, campaign_id: i32, donor_id: i32) -> AppResult<()> {
        sqlx::query(
            "UPDATE campaign_participants SET has_donated = TRUE WHERE campaign_id = $1 AND donor_id = $2",
        )
        .bind(campaign_id)
        .bind(donor_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Count campaigns that have not ended yet
    pub async fn count_active(&self, now: DateTime<Utc>) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM campaigns WHERE end_datetime > $1")
                .bind(now)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
