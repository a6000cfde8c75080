// Startup configuration for token signing and verification
//
// Loaded once in main and handed to the services that need it; nothing
// reads signing material from the environment after startup.

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Default token lifetime when TOKEN_TTL_MINUTES is unset
const DEFAULT_TTL_MINUTES: i64 = 30;

/// Errors that can occur while loading the auth configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("JWT_ALGORITHM is not a recognized algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("TOKEN_TTL_MINUTES must be a positive integer: {0}")]
    InvalidTtl(String),
}

/// Immutable signing configuration.
///
/// The secret and algorithm have no defaults: a deployment that forgets
/// to set them fails at startup instead of signing with a known value.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Build a configuration from explicit values
    pub fn new(secret: &str, algorithm: Algorithm, token_ttl: Duration) -> Self {
        Self {
            secret: secret.to_string(),
            algorithm,
            token_ttl,
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// JWT_SECRET and JWT_ALGORITHM are required; TOKEN_TTL_MINUTES is
    /// optional and defaults to 30.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let algorithm_name =
            std::env::var("JWT_ALGORITHM").map_err(|_| ConfigError::Missing("JWT_ALGORITHM"))?;
        let algorithm = Algorithm::from_str(&algorithm_name)
            .map_err(|_| ConfigError::InvalidAlgorithm(algorithm_name))?;

        let token_ttl = match std::env::var("TOKEN_TTL_MINUTES") {
            Ok(raw) => {
                let minutes: i64 = raw
                    .parse()
                    .ok()
                    .filter(|m| *m > 0)
                    .ok_or(ConfigError::InvalidTtl(raw))?;
                Duration::minutes(minutes)
            }
            Err(_) => Duration::minutes(DEFAULT_TTL_MINUTES),
        };

        Ok(Self {
            secret,
            algorithm,
            token_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_explicit_values() {
        let config = AuthConfig::new("secret", Algorithm::HS384, Duration::minutes(5));

        assert_eq!(config.secret, "secret");
        assert_eq!(config.algorithm, Algorithm::HS384);
        assert_eq!(config.token_ttl, Duration::minutes(5));
    }

    #[test]
    fn test_default_ttl_is_thirty_minutes() {
        assert_eq!(DEFAULT_TTL_MINUTES, 30);
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!(Algorithm::from_str("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(Algorithm::from_str("HS512").unwrap(), Algorithm::HS512);
        assert!(Algorithm::from_str("none").is_err());
        assert!(Algorithm::from_str("HS257").is_err());
    }
}
