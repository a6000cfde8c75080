// Validation utilities module
// Provides custom validation functions for domain-specific rules

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates that a price is strictly positive
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        Err(ValidationError::new("price_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates that a username contains only ASCII alphanumerics and
/// underscores
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_price_is_accepted() {
        assert!(validate_price(&dec!(0.01)).is_ok());
        assert!(validate_price(&dec!(999.99)).is_ok());
    }

    #[test]
    fn test_zero_and_negative_prices_are_rejected() {
        assert!(validate_price(&Decimal::ZERO).is_err());
        assert!(validate_price(&dec!(-1.50)).is_err());
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("alice_99").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("alice smith").is_err());
        assert!(validate_username("alice@example").is_err());
    }
}
