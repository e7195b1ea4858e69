//! Authentication service: registration, login, tokens

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{
            CreateVolunteer, RegisterUser, UpdateProfile, UpdateVolunteer, User, UserClaims,
            UserShort,
        },
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account. New registrations are donors; staff accounts
    /// are only created through the volunteer management endpoints.
    pub async fn register(&self, input: RegisterUser) -> AppResult<(User, String)> {
        let hash = Self::hash_password(&input.password)?;

        let user = self
            .repository
            .users
            .create(
                &input.username,
                &hash,
                Some(&input.firstname),
                Some(&input.lastname),
                Some(&input.email),
                Role::Donor,
            )
            .await?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Authenticate by username and password
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(User, String)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !user.is_active {
            return Err(AppError::Authentication("Account is disabled".to_string()));
        }

        Self::verify_password(password, &user.password)?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Get the authenticated user's account
    pub async fn me(&self, user_id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }

    /// Update the authenticated user's own profile
    pub async fn update_profile(&self, user_id: i32, input: UpdateProfile) -> AppResult<User> {
        self.repository
            .users
            .update_profile(
                user_id,
                input.firstname.as_deref(),
                input.lastname.as_deref(),
                input.email.as_deref(),
            )
            .await
    }

    /// Build and sign a JWT for the user
    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.config.jwt_expiration_hours as i64)).timestamp(),
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    // Volunteer accounts are staff users managed by the superuser.

    pub async fn list_volunteers(
        &self,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<UserShort>, i64)> {
        self.repository.users.list_volunteers(page, per_page).await
    }

    pub async fn create_volunteer(&self, input: CreateVolunteer) -> AppResult<User> {
        let hash = Self::hash_password(&input.password)?;

        let user = self
            .repository
            .users
            .create(
                &input.username,
                &hash,
                input.firstname.as_deref(),
                input.lastname.as_deref(),
                input.email.as_deref(),
                Role::Staff,
            )
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "Volunteer account created");
        Ok(user)
    }

    pub async fn update_volunteer(&self, id: i32, input: UpdateVolunteer) -> AppResult<User> {
        self.repository
            .users
            .update_volunteer(
                id,
                input.username.as_deref(),
                input.firstname.as_deref(),
                input.lastname.as_deref(),
                input.email.as_deref(),
                input.is_active,
            )
            .await
    }

    pub async fn delete_volunteer(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete_volunteer(id).await
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    pub fn verify_password(password: &str, hash: &str) -> AppResult<()> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AppError::Authentication("Invalid username or password".to_string()))
    }
}
