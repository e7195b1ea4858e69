//! Blood requests repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::request::{BloodRequest, CreateRequest, DispositionPlan, RequestQuery},
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BloodRequest> {
        sqlx::query_as::<_, BloodRequest>("SELECT * FROM blood_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blood request with id {} not found", id)))
    }

    /// Create a request in PENDING with no assigned unit
    pub async fn create(&self, requestor_id: i32, input: &CreateRequest) -> AppResult<BloodRequest> {
        let request = sqlx::query_as::<_, BloodRequest>(
            r#"
            INSERT INTO blood_requests
                (requestor_id, patient_name, patient_blood_group, hospital_name,
                 hospital_address, physician_name, physician_license,
                 component, quantity, urgency, reason)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(requestor_id)
        .bind(&input.patient_name)
        .bind(input.patient_blood_group)
        .bind(&input.hospital_name)
        .bind(&input.hospital_address)
        .bind(&input.physician_name)
        .bind(&input.physician_license)
        .bind(input.component.unwrap_or(crate::models::enums::Component::Whole))
        .bind(input.quantity.unwrap_or(1))
        .bind(input.urgency.unwrap_or(crate::models::enums::Urgency::Routine))
        .bind(&input.reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// List requests with search and pagination, newest first
    pub async fn list(&self, query: &RequestQuery) -> AppResult<(Vec<BloodRequest>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(8).clamp(1, 100);

        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT * FROM blood_requests WHERE 1=1");
        Self::push_filters(&mut builder, query);
        builder.push(" ORDER BY request_date DESC LIMIT ");
        builder.push_bind(per_page);
        builder.push(" OFFSET ");
        builder.push_bind((page - 1) * per_page);

        let requests = builder
            .build_query_as::<BloodRequest>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blood_requests WHERE 1=1");
        Self::push_filters(&mut count_builder, query);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((requests, total))
    }

    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &RequestQuery) {
        if let Some(ref q) = query.q {
            let pattern = format!("%{}%", q);
            builder.push(" AND (patient_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR hospital_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR physician_name ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ");
            builder.push_bind(status);
        }
        if let Some(urgency) = query.urgency {
            builder.push(" AND urgency = ");
            builder.push_bind(urgency);
        }
        if let Some(bg) = query.blood_group {
            builder.push(" AND patient_blood_group = ");
            builder.push_bind(bg);
        }
    }

    /// Requests submitted by a user, newest first
    pub async fn list_for_requestor(
        &self,
        requestor_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<BloodRequest>, i64)> {
        let requests = sqlx::query_as::<_, BloodRequest>(
            r#"
            SELECT * FROM blood_requests
            WHERE requestor_id = $1
            ORDER BY request_date DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(requestor_id)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blood_requests WHERE requestor_id = $1")
                .bind(requestor_id)
                .fetch_one(&self.pool)
                .await?;

        Ok((requests, total))
    }

    /// Apply a disposition plan as one transaction.
    ///
    /// Every unit status change is a compare-and-set against the status the
    /// plan was computed from; if any unit moved in the meantime the whole
    /// transaction rolls back and the operator must re-submit.
    pub async fn apply_disposition(
        &self,
        request_id: i32,
        plan: &DispositionPlan,
        operator_id: i32,
    ) -> AppResult<BloodRequest> {
        let mut tx = self.pool.begin().await?;

        for action in &plan.actions {
            let result =
                sqlx::query("UPDATE blood_units SET status = $1 WHERE id = $2 AND status = $3")
                    .bind(action.to)
                    .bind(action.unit_id)
                    .bind(action.from)
                    .execute(&mut *tx)
                    .await?;

            if result.rows_affected() == 0 {
                // Rolls back on drop
                return Err(AppError::ConcurrentModification(format!(
                    "Blood unit {} is no longer {}",
                    action.unit_id, action.from
                )));
            }
        }

        let request = sqlx::query_as::<_, BloodRequest>(
            r#"
            UPDATE blood_requests
            SET status = $1, assigned_unit_id = $2, processed_by = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(plan.new_status)
        .bind(plan.assigned_unit_id)
        .bind(operator_id)
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Blood request with id {} not found", request_id))
        })?;

        tx.commit().await?;

        Ok(request)
    }

    /// Count requests awaiting validation
    pub async fn count_pending(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blood_requests WHERE status = 'PENDING'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
