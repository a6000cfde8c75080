// Request-level authentication gate and role authorization policy

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{error::AuthError, models::Role, token::TokenService};

/// Verified identity attached to a request for the duration of handling.
///
/// The bearer token is extracted and verified exactly once, here; handlers
/// receive the decoded claims and never re-verify. The claims are trusted
/// verbatim for the lifetime of the request — the identity record is not
/// re-read to confirm the role has not changed since issuance.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Role authorization policy: exact match only, no hierarchy
    pub fn require_role(&self, required: Role) -> Result<(), AuthError> {
        if self.role != required {
            warn!(
                "Authorization failed: subject={}, required_role={}, actual_role={}",
                self.username, required, self.role
            );
            return Err(AuthError::InsufficientPermissions {
                required,
                actual: self.role,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| {
                warn!(
                    "Missing Authorization header on protected endpoint: {}",
                    parts.uri.path()
                );
                AuthError::MissingToken
            })?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        // Verify Bearer token format
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        // Token service comes from router state; never from ambient env
        let token_service = Arc::<TokenService>::from_ref(state);
        let claims = token_service.verify(token)?;

        debug!("Authenticated subject={} role={}", claims.sub, claims.role);
        Ok(AuthenticatedUser {
            username: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use axum::http::Request;
    use chrono::Duration;
    use jsonwebtoken::Algorithm;
    use proptest::prelude::*;

    // Helper to create a test token service in router-state form
    fn test_state() -> Arc<TokenService> {
        Arc::new(TokenService::new(&AuthConfig::new(
            "test_secret_key_for_testing_purposes",
            Algorithm::HS256,
            Duration::minutes(30),
        )))
    }

    // Helper to create test parts with Authorization header
    fn create_parts_with_auth(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    // Helper to create test parts without Authorization header
    fn create_parts_without_auth() -> Parts {
        let req = Request::builder().uri("/").body(()).unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    #[tokio::test]
    async fn test_valid_token_is_accepted() {
        let state = test_state();
        let token = state.issue("alice", Role::User).unwrap();
        let auth_header = format!("Bearer {}", token);

        let mut parts = create_parts_with_auth(&auth_header);
        let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

        assert!(result.is_ok());
        let user = result.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_missing_authorization_header() {
        let state = test_state();
        let mut parts = create_parts_without_auth();
        let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[tokio::test]
    async fn test_invalid_bearer_format() {
        let state = test_state();
        let invalid_formats = vec![
            "InvalidFormat token",
            "token_without_bearer",
            "Basic dXNlcjpwYXNz", // Basic auth instead of Bearer
        ];

        for auth_value in invalid_formats {
            let mut parts = create_parts_with_auth(auth_value);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

            assert!(matches!(result, Err(AuthError::InvalidToken)));
        }
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let state = test_state();
        let token = state
            .issue_with_ttl("alice", Role::User, Duration::seconds(-500))
            .unwrap();
        let auth_header = format!("Bearer {}", token);

        let mut parts = create_parts_with_auth(&auth_header);
        let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

        assert!(matches!(result, Err(AuthError::ExpiredToken)));
    }

    #[tokio::test]
    async fn test_malformed_token_is_rejected() {
        let state = test_state();
        let malformed_tokens = vec![
            "Bearer invalid_token",
            "Bearer not.a.valid.jwt",
            "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature",
        ];

        for token in malformed_tokens {
            let mut parts = create_parts_with_auth(token);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &state).await;

            assert!(result.is_err());
        }
    }

    // ===== Role policy tests =====

    #[test]
    fn test_require_role_admin_allows_admin() {
        let user = AuthenticatedUser {
            username: "root".to_string(),
            role: Role::Admin,
        };
        assert!(user.require_role(Role::Admin).is_ok());
    }

    #[test]
    fn test_require_role_admin_denies_user() {
        let user = AuthenticatedUser {
            username: "alice".to_string(),
            role: Role::User,
        };
        match user.require_role(Role::Admin) {
            Err(AuthError::InsufficientPermissions { required, actual }) => {
                assert_eq!(required, Role::Admin);
                assert_eq!(actual, Role::User);
            }
            other => panic!("Expected InsufficientPermissions, got {:?}", other),
        }
    }

    #[test]
    fn test_require_role_has_no_hierarchy() {
        // Admin does not implicitly satisfy a user check
        let admin = AuthenticatedUser {
            username: "root".to_string(),
            role: Role::Admin,
        };
        assert!(matches!(
            admin.require_role(Role::User),
            Err(AuthError::InsufficientPermissions { .. })
        ));
    }

    // Property-based tests using proptest

    proptest! {
        #[test]
        fn prop_valid_tokens_are_accepted(
            subject in "[a-z][a-z0-9_]{2,15}"
        ) {
            let state = test_state();
            let token = state.issue(&subject, Role::User).unwrap();
            let auth_header = format!("Bearer {}", token);

            let mut parts = create_parts_with_auth(&auth_header);
            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(AuthenticatedUser::from_request_parts(&mut parts, &state));

            prop_assert!(result.is_ok());
            prop_assert_eq!(result.unwrap().username, subject);
        }

        #[test]
        fn prop_malformed_tokens_are_rejected(
            malformed in "[a-zA-Z0-9]{10,50}"
        ) {
            let state = test_state();
            let auth_header = format!("Bearer {}", malformed);
            let mut parts = create_parts_with_auth(&auth_header);

            let rt = tokio::runtime::Runtime::new().unwrap();
            let result = rt.block_on(AuthenticatedUser::from_request_parts(&mut parts, &state));

            prop_assert!(result.is_err());
        }
    }
}
