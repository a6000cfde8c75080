// Identity store adapter over PostgreSQL

use axum::async_trait;
use sqlx::PgPool;

use crate::auth::{
    error::AuthError,
    models::{Role, User},
};

/// Store operations the auth flows depend on.
///
/// `UserRepository` is the PostgreSQL implementation; service tests
/// substitute an in-memory store so the flows can be exercised without a
/// live database.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError>;

    /// Insert a new identity record. A duplicate username surfaces as
    /// `UsernameTaken` and must leave the existing record untouched.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, AuthError>;

    /// Update username and email in place, returning matched-row count.
    async fn update_profile(
        &self,
        current_username: &str,
        new_username: &str,
        new_email: &str,
    ) -> Result<u64, AuthError>;

    /// Replace the stored password hash, returning matched-row count.
    async fn update_password(&self, username: &str, password_hash: &str)
        -> Result<u64, AuthError>;
}

/// User repository for identity record operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if a username is already registered
    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists.0)
    }

    /// Insert a new identity record.
    ///
    /// The unique index on username is the real duplicate guard; the
    /// caller's pre-insert existence check is advisory only, so a
    /// constraint violation here still surfaces as `UsernameTaken`.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, password_hash, role, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::UsernameTaken;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    /// Update username and email in place.
    ///
    /// Returns the number of matched rows so callers can distinguish
    /// "user not found" from a successful update.
    async fn update_profile(
        &self,
        current_username: &str,
        new_username: &str,
        new_email: &str,
    ) -> Result<u64, AuthError> {
        let result = sqlx::query("UPDATE users SET username = $1, email = $2 WHERE username = $3")
            .bind(new_username)
            .bind(new_email)
            .bind(current_username)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AuthError::UsernameTaken;
                    }
                }
                AuthError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }

    /// Replace the stored password hash. Returns matched-row count.
    async fn update_password(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<u64, AuthError> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE username = $2")
            .bind(password_hash)
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
