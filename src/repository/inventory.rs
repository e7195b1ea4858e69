//! Blood inventory repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{BloodGroup, UnitStatus},
        inventory::{BloodUnit, UnitQuery},
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: Pool<Postgres>,
}

impl InventoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get unit by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BloodUnit> {
        sqlx::query_as::<_, BloodUnit>("SELECT * FROM blood_units WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blood unit with id {} not found", id)))
    }

    /// List units with search and pagination, soonest expiry first
    pub async fn list(&self, query: &UnitQuery) -> AppResult<(Vec<BloodUnit>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(8).clamp(1, 100);

        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT * FROM blood_units WHERE 1=1");
        Self::push_filters(&mut builder, query);
        builder.push(" ORDER BY expiry_date LIMIT ");
        builder.push_bind(per_page);
        builder.push(" OFFSET ");
        builder.push_bind((page - 1) * per_page);

        let units = builder
            .build_query_as::<BloodUnit>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blood_units WHERE 1=1");
        Self::push_filters(&mut count_builder, query);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((units, total))
    }

    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &UnitQuery) {
        if let Some(ref q) = query.q {
            builder.push(" AND serial_number ILIKE ");
            builder.push_bind(format!("%{}%", q));
        }
        if let Some(bg) = query.blood_group {
            builder.push(" AND blood_group = ");
            builder.push_bind(bg);
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ");
            builder.push_bind(status);
        }
    }

    /// Create a unit. Serial numbers are unique across the whole inventory.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        serial_number: &str,
        donor_id: Option<i32>,
        campaign_id: Option<i32>,
        blood_group: BloodGroup,
        status: UnitStatus,
        date_collected: DateTime<Utc>,
        expiry_date: DateTime<Utc>,
        processed_by: i32,
    ) -> AppResult<BloodUnit> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM blood_units WHERE serial_number = $1)")
                .bind(serial_number)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "Serial number '{}' already exists",
                serial_number
            )));
        }

        let unit = sqlx::query_as::<_, BloodUnit>(
            r#"
            INSERT INTO blood_units
                (serial_number, donor_id, campaign_id, blood_group, status,
                 date_collected, expiry_date, processed_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(serial_number)
        .bind(donor_id)
        .bind(campaign_id)
        .bind(blood_group)
        .bind(status)
        .bind(date_collected)
        .bind(expiry_date)
        .bind(processed_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(unit)
    }

    /// Staff edit of a unit's descriptive fields
    pub async fn update(
        &self,
        id: i32,
        serial_number: &str,
        donor_id: Option<i32>,
        blood_group: BloodGroup,
        status: UnitStatus,
        expiry_date: DateTime<Utc>,
    ) -> AppResult<BloodUnit> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM blood_units WHERE serial_number = $1 AND id != $2)",
        )
        .bind(serial_number)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if taken {
            return Err(AppError::Conflict(format!(
                "Serial number '{}' already exists",
                serial_number
            )));
        }

        let unit = sqlx::query_as::<_, BloodUnit>(
            r#"
            UPDATE blood_units
            SET serial_number = $1, donor_id = $2, blood_group = $3, status = $4, expiry_date = $5
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(serial_number)
        .bind(donor_id)
        .bind(blood_group)
        .bind(status)
        .bind(expiry_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blood unit with id {} not found", id)))?;

        Ok(unit)
    }

    /// Delete a unit
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM blood_units WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Blood unit with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Candidate units for a disposition: every AVAILABLE unit of the
    /// patient's blood group, plus the unit currently assigned to the
    /// request (so an operator editing an approved request can keep it).
    pub async fn find_candidates(
        &self,
        blood_group: BloodGroup,
        current_unit_id: Option<i32>,
    ) -> AppResult<Vec<BloodUnit>> {
        let units = sqlx::query_as::<_, BloodUnit>(
            r#"
            SELECT * FROM blood_units
            WHERE (status = 'AVAILABLE' AND blood_group = $1) OR id = $2
            ORDER BY expiry_date
            "#,
        )
        .bind(blood_group)
        .bind(current_unit_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(units)
    }

    /// Donations attributed to a donor, newest first
    pub async fn list_for_donor(
        &self,
        donor_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<BloodUnit>, i64)> {
        let units = sqlx::query_as::<_, BloodUnit>(
            r#"
            SELECT * FROM blood_units
            WHERE donor_id = $1
            ORDER BY date_collected DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(donor_id)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blood_units WHERE donor_id = $1")
            .bind(donor_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((units, total))
    }

    /// Count units currently AVAILABLE
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blood_units WHERE status = 'AVAILABLE'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Most recently collected units, for the dashboard
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<BloodUnit>> {
        let units = sqlx::query_as::<_, BloodUnit>(
            "SELECT * FROM blood_units ORDER BY date_collected DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(units)
    }
}
