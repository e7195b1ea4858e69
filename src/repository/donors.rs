//! Donors repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::{
        donor::{Donor, DonorDetails, DonorQuery},
        enums::BloodGroup,
    },
};

const DONOR_DETAILS_SELECT: &str = r#"
    SELECT d.id, d.user_id, u.username, u.firstname, u.lastname, u.email,
           d.blood_group, d.contact_no, d.address,
           (SELECT COUNT(*) FROM blood_units b WHERE b.donor_id = d.id) AS donation_count
    FROM donors d
    JOIN users u ON d.user_id = u.id
"#;

#[derive(Clone)]
pub struct DonorsRepository {
    pool: Pool<Postgres>,
}

impl DonorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get donor profile by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>("SELECT * FROM donors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Donor with id {} not found", id)))
    }

    /// Get donor profile by owning user ID
    pub async fn get_by_user_id(&self, user_id: i32) -> AppResult<Option<Donor>> {
        let donor = sqlx::query_as::<_, Donor>("SELECT * FROM donors WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(donor)
    }

    /// Get donor with account details
    pub async fn get_details(&self, id: i32) -> AppResult<DonorDetails> {
        let query = format!("{} WHERE d.id = $1", DONOR_DETAILS_SELECT);
        sqlx::query_as::<_, DonorDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Donor with id {} not found", id)))
    }

    /// Create a donor profile for an existing user
    pub async fn create(
        &self,
        user_id: i32,
        blood_group: Option<BloodGroup>,
        contact_no: &str,
        address: &str,
    ) -> AppResult<Donor> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM donors WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(AppError::Conflict(
                "Donor profile already exists for this user".to_string(),
            ));
        }

        let donor = sqlx::query_as::<_, Donor>(
            r#"
            INSERT INTO donors (user_id, blood_group, contact_no, address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(blood_group)
        .bind(contact_no)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;

        Ok(donor)
    }

    /// List donors with search and pagination, newest first
    pub async fn list(&self, query: &DonorQuery) -> AppResult<(Vec<DonorDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(8).clamp(1, 100);

        let mut builder = QueryBuilder::<Postgres>::new(DONOR_DETAILS_SELECT);
        builder.push(" WHERE 1=1");
        if let Some(ref q) = query.q {
            let pattern = format!("%{}%", q);
            builder.push(" AND (u.firstname ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR u.lastname ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR u.username ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(bg) = query.blood_group {
            builder.push(" AND d.blood_group = ");
            builder.push_bind(bg);
        }
        builder.push(" ORDER BY d.id DESC LIMIT ");
        builder.push_bind(per_page);
        builder.push(" OFFSET ");
        builder.push_bind((page - 1) * per_page);

        let donors = builder
            .build_query_as::<DonorDetails>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM donors d JOIN users u ON d.user_id = u.id WHERE 1=1",
        );
        if let Some(ref q) = query.q {
            let pattern = format!("%{}%", q);
            count_builder.push(" AND (u.firstname ILIKE ");
            count_builder.push_bind(pattern.clone());
            count_builder.push(" OR u.lastname ILIKE ");
            count_builder.push_bind(pattern.clone());
            count_builder.push(" OR u.username ILIKE ");
            count_builder.push_bind(pattern);
            count_builder.push(")");
        }
        if let Some(bg) = query.blood_group {
            count_builder.push(" AND d.blood_group = ");
            count_builder.push_bind(bg);
        }
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((donors, total))
    }

    /// Update a donor profile
    pub async fn update(
        &self,
        id: i32,
        blood_group: Option<BloodGroup>,
        contact_no: Option<&str>,
        address: Option<&str>,
    ) -> AppResult<Donor> {
        let donor = sqlx::query_as::<_, Donor>(
            r#"
            UPDATE donors
            SET blood_group = COALESCE($1, blood_group),
                contact_no = COALESCE($2, contact_no),
                address = COALESCE($3, address)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(blood_group)
        .bind(contact_no)
        .bind(address)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Donor with id {} not found", id)))?;

        Ok(donor)
    }

    /// Delete a donor profile (cascades from the user row)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        // Removing the account removes the profile via ON DELETE CASCADE
        let result = sqlx::query(
            "DELETE FROM users WHERE id = (SELECT user_id FROM donors WHERE id = $1)",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Donor with id {} not found", id)));
        }
        Ok(())
    }

    /// Count donor profiles
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
