//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{User, UserShort},
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by username (login)
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Create a user account with the given role and pre-hashed password
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        firstname: Option<&str>,
        lastname: Option<&str>,
        email: Option<&str>,
        role: Role,
    ) -> AppResult<User> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, firstname, lastname, email, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update name/email fields on a user, keeping unset fields intact
    pub async fn update_profile(
        &self,
        id: i32,
        firstname: Option<&str>,
        lastname: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET firstname = COALESCE($1, firstname),
                lastname = COALESCE($2, lastname),
                email = COALESCE($3, email)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        Ok(user)
    }

    /// List staff accounts (volunteers), newest first
    pub async fn list_volunteers(&self, page: i64, per_page: i64) -> AppResult<(Vec<UserShort>, i64)> {
        let offset = (page - 1) * per_page;

        let volunteers = sqlx::query_as::<_, UserShort>(
            r#"
            SELECT id, username, firstname, lastname, email, role, is_active
            FROM users
            WHERE role = 'staff'
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'staff'")
            .fetch_one(&self.pool)
            .await?;

        Ok((volunteers, total))
    }

    /// Update a volunteer account
    pub async fn update_volunteer(
        &self,
        id: i32,
        username: Option<&str>,
        firstname: Option<&str>,
        lastname: Option<&str>,
        email: Option<&str>,
        is_active: Option<bool>,
    ) -> AppResult<User> {
        if let Some(name) = username {
            let taken: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND id != $2)",
            )
            .bind(name)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
            if taken {
                return Err(AppError::Conflict(format!(
                    "Username '{}' is already taken",
                    name
                )));
            }
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE($1, username),
                firstname = COALESCE($2, firstname),
                lastname = COALESCE($3, lastname),
                email = COALESCE($4, email),
                is_active = COALESCE($5, is_active)
            WHERE id = $6 AND role = 'staff'
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Volunteer with id {} not found", id)))?;

        Ok(user)
    }

    /// Delete a volunteer account
    pub async fn delete_volunteer(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = 'staff'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Volunteer with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Count staff accounts
    pub async fn count_volunteers(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'staff'")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
