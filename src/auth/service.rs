// Authentication service - business logic layer

use std::sync::Arc;
use tracing::info;

use crate::auth::{
    error::AuthError,
    models::{ChangePasswordRequest, LoginRequest, RegisterRequest, Role, UpdateProfileRequest, UserResponse},
    password::PasswordService,
    repository::{IdentityStore, UserRepository},
    token::TokenService,
};

/// Authentication service coordinating hashing, token issuance, and the
/// identity store
pub struct AuthService<S: IdentityStore = UserRepository> {
    users: S,
    tokens: Arc<TokenService>,
}

impl<S: IdentityStore> AuthService<S> {
    /// Create a new AuthService
    pub fn new(users: S, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new user with the default role.
    ///
    /// The existence check is advisory; a concurrent duplicate registration
    /// is ultimately caught by the store's unique constraint.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        if self.users.username_exists(&request.username).await? {
            return Err(AuthError::UsernameTaken);
        }

        let password_hash = PasswordService::hash_password(&request.password)?;
        self.users
            .create_user(&request.username, &request.email, &password_hash, Role::User)
            .await?;

        info!("Registered new user: {}", request.username);
        Ok(())
    }

    /// Login flow: lookup, verify hash, issue token.
    ///
    /// Absent user and wrong password produce the same rejection so account
    /// existence is not revealed. A reject is final for this request.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.tokens.issue(&user.username, user.role)
    }

    /// Full profile from the identity store (password hash excluded)
    pub async fn profile(&self, username: &str) -> Result<UserResponse, AuthError> {
        self.users
            .find_by_username(username)
            .await?
            .map(UserResponse::from)
            .ok_or(AuthError::UserNotFound)
    }

    /// Update username and email for the subject
    pub async fn update_profile(
        &self,
        username: &str,
        request: &UpdateProfileRequest,
    ) -> Result<(), AuthError> {
        let matched = self
            .users
            .update_profile(username, &request.username, &request.email)
            .await?;

        if matched == 0 {
            return Err(AuthError::UserNotFound);
        }

        info!("Profile updated for user: {}", username);
        Ok(())
    }

    /// Change the subject's password after verifying the old one.
    ///
    /// A wrong old password is rejected with the same shape as a login
    /// failure.
    pub async fn change_password(
        &self,
        username: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(&request.old_password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let new_hash = PasswordService::hash_password(&request.new_password)?;
        let matched = self.users.update_password(username, &new_hash).await?;
        if matched == 0 {
            return Err(AuthError::UserNotFound);
        }

        info!("Password changed for user: {}", username);
        Ok(())
    }
}
