// HTTP handlers for authentication, profile, and admin endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{
        ChangePasswordRequest, LoginRequest, MessageResponse, ProfileResponse, RegisterRequest,
        Role, TokenResponse, UpdateProfileRequest, UserResponse,
    },
};
use crate::AppState;

/// Register a new user
/// POST /auth/register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state.auth_service.register(&request).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login a user, returning a bearer token
/// POST /auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let access_token = state.auth_service.login(&request).await?;

    Ok(Json(TokenResponse { access_token }))
}

/// Profile view built from verified claims alone; no store access
/// GET /user/profile
pub async fn profile_handler(user: AuthenticatedUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        username: user.username,
        role: user.role,
    })
}

/// Full profile from the identity store
/// GET /user/profile/full
pub async fn full_profile_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let profile = state.auth_service.profile(&user.username).await?;
    Ok(Json(profile))
}

/// Update username/email for the authenticated subject
/// PUT /user/update
pub async fn update_profile_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state
        .auth_service
        .update_profile(&user.username, &request)
        .await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

/// Change the authenticated subject's password
/// PUT /user/change-password
pub async fn change_password_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state
        .auth_service
        .change_password(&user.username, &request)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// Admin-only diagnostic endpoint
/// GET /user/admin-only
pub async fn admin_area_handler(
    user: AuthenticatedUser,
) -> Result<Json<MessageResponse>, AuthError> {
    user.require_role(Role::Admin)?;

    Ok(Json(MessageResponse {
        message: format!("Welcome Admin {}", user.username),
    }))
}
