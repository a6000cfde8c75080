// JWT token issuance and verification service

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::auth::models::Role;
use crate::config::AuthConfig;

/// Decoded token claims.
///
/// All fields are required: a token missing any of them fails verification
/// rather than being trusted as an open map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    pub role: Role,
    /// Absolute expiration instant (unix seconds)
    pub exp: i64,
}

/// Token service for JWT operations.
///
/// Holds the signing material loaded once at startup; issuance and
/// verification are pure functions over it plus the inputs, so a single
/// instance is safely shared across concurrent requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    token_ttl: Duration,
}

impl TokenService {
    /// Create a TokenService from the startup configuration
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: config.algorithm,
            token_ttl: config.token_ttl,
        }
    }

    /// Issue a signed token for the subject with the configured lifetime
    pub fn issue(&self, subject: &str, role: Role) -> Result<String, AuthError> {
        self.issue_with_ttl(subject, role, self.token_ttl)
    }

    /// Issue a signed token with an explicit lifetime
    pub fn issue_with_ttl(
        &self,
        subject: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: subject.to_string(),
            role,
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify signature, algorithm, and expiry, returning the decoded claims.
    ///
    /// Side-effect free: the same unexpired token always yields the same
    /// claims. Malformed tokens, bad signatures, wrong algorithms, and
    /// missing claims all map to `InvalidToken`; expiry maps to
    /// `ExpiredToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new(&AuthConfig::new(
            "test_secret_key_for_testing_purposes",
            Algorithm::HS256,
            Duration::minutes(30),
        ))
    }

    // Helper to flip the last character of the signature segment
    fn tamper_signature(token: &str) -> String {
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3, "expected a three-segment JWT");
        let sig = parts[2];
        let replacement = if sig.ends_with('A') { "B" } else { "A" };
        format!(
            "{}.{}.{}{}",
            parts[0],
            parts[1],
            &sig[..sig.len() - 1],
            replacement
        )
    }

    #[test]
    fn test_issue_then_verify_returns_identical_claims() {
        let service = test_token_service();
        let token = service.issue("alice", Role::User).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, Role::User);

        // Deterministic: a second verification yields the same claims
        let again = service.verify(&token).unwrap();
        assert_eq!(claims, again);
    }

    #[test]
    fn test_expiration_honors_configured_ttl() {
        let service = test_token_service();
        let before = Utc::now().timestamp();
        let token = service.issue("alice", Role::User).unwrap();
        let claims = service.verify(&token).unwrap();

        let ttl_seconds = Duration::minutes(30).num_seconds();
        assert!(claims.exp >= before + ttl_seconds);
        assert!(claims.exp <= before + ttl_seconds + 2);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_token_service();
        let token = service
            .issue_with_ttl("alice", Role::User, Duration::seconds(-60))
            .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::ExpiredToken)
        ));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let service = test_token_service();
        let token = service.issue("alice", Role::Admin).unwrap();

        let tampered = tamper_signature(&token);
        assert_ne!(token, tampered);
        assert!(matches!(
            service.verify(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = test_token_service();
        let other = TokenService::new(&AuthConfig::new(
            "a_completely_different_secret",
            Algorithm::HS256,
            Duration::minutes(30),
        ));

        let token = other.issue("alice", Role::User).unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_algorithm_is_rejected() {
        // Same secret, different algorithm: verification is pinned to the
        // configured algorithm rather than trusting the token header
        let hs384 = TokenService::new(&AuthConfig::new(
            "test_secret_key_for_testing_purposes",
            Algorithm::HS384,
            Duration::minutes(30),
        ));
        let token = hs384.issue("alice", Role::User).unwrap();

        let service = test_token_service();
        assert!(matches!(
            service.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_missing_role_claim_is_rejected() {
        let payload = serde_json::json!({
            "sub": "alice",
            "exp": (Utc::now() + Duration::minutes(30)).timestamp(),
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap();

        let service = test_token_service();
        assert!(matches!(
            service.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.verify("").is_err());
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("missing_segments").is_err());
        assert!(service
            .verify("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    // Property-based tests using proptest

    fn arb_role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::User), Just(Role::Admin)]
    }

    proptest! {
        #[test]
        fn prop_verify_of_issue_preserves_subject_and_role(
            subject in "[a-z][a-z0-9_]{2,15}",
            role in arb_role(),
            ttl_minutes in 1i64..120,
        ) {
            let service = test_token_service();
            let token = service
                .issue_with_ttl(&subject, role, Duration::minutes(ttl_minutes))
                .unwrap();
            let claims = service.verify(&token).unwrap();

            prop_assert_eq!(claims.sub, subject);
            prop_assert_eq!(claims.role, role);
        }

        #[test]
        fn prop_random_strings_are_rejected(
            malformed in "[a-zA-Z0-9]{10,50}"
        ) {
            let service = test_token_service();
            prop_assert!(service.verify(&malformed).is_err());
        }
    }
}
