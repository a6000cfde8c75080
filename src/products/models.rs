// Product catalog data models and DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Represents a product in the catalog
///
/// Identifiers are store-generated and opaque to clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "Mechanical Keyboard")]
    pub name: String,
    #[schema(example = "Tenkeyless, hot-swappable switches")]
    pub description: String,
    #[schema(value_type = f64, example = 89.99)]
    pub price: Decimal,
    #[schema(example = 25)]
    pub stock: i32,
}

/// Represents the data needed to create a new product
///
/// Used for POST /products requests; id is store-generated
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1))]
    #[schema(example = "Mechanical Keyboard")]
    pub name: String,
    #[schema(example = "Tenkeyless, hot-swappable switches")]
    pub description: String,
    #[validate(custom = "crate::validation::validate_price")]
    #[schema(value_type = f64, example = 89.99)]
    pub price: Decimal,
    #[validate(range(min = 0))]
    #[schema(example = 25)]
    pub stock: i32,
}

/// Represents the data for replacing an existing product
///
/// Used for PUT /products/{id} requests; all fields are required
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1))]
    #[schema(example = "Mechanical Keyboard")]
    pub name: String,
    #[schema(example = "Updated description")]
    pub description: String,
    #[validate(custom = "crate::validation::validate_price")]
    #[schema(value_type = f64, example = 79.99)]
    pub price: Decimal,
    #[validate(range(min = 0))]
    #[schema(example = 20)]
    pub stock: i32,
}

/// Query parameters for GET /products/search
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name and description;
    /// must be non-empty so the search never degenerates to a full scan
    #[validate(length(min = 1))]
    pub query: String,
}

/// Query parameters for GET /products/filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct FilterQuery {
    /// Lower price bound (inclusive), defaults to 0
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    /// Upper price bound (inclusive), defaults to 999999
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
    /// Minimum stock (inclusive), defaults to 0
    pub min_stock: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use validator::Validate;

    #[test]
    fn test_product_serialization() {
        let product = Product {
            id: Uuid::nil(),
            name: "Mechanical Keyboard".to_string(),
            description: "Tenkeyless".to_string(),
            price: dec!(89.99),
            stock: 25,
        };

        let json = serde_json::to_string(&product).expect("Failed to serialize Product");
        assert!(json.contains("\"name\":\"Mechanical Keyboard\""));
        assert!(json.contains("\"price\":\"89.99\""));
        assert!(json.contains("\"stock\":25"));
    }

    #[test]
    fn test_create_product_deserialization() {
        let json = r#"{
            "name": "Mouse",
            "description": "Wireless",
            "price": "19.99",
            "stock": 100
        }"#;

        let create: CreateProduct =
            serde_json::from_str(json).expect("Failed to deserialize CreateProduct");
        assert_eq!(create.name, "Mouse");
        assert_eq!(create.price, dec!(19.99));
        assert_eq!(create.stock, 100);
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_create_product_rejects_non_positive_price() {
        let create = CreateProduct {
            name: "Mouse".to_string(),
            description: "Wireless".to_string(),
            price: dec!(0),
            stock: 5,
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_create_product_rejects_negative_stock() {
        let create = CreateProduct {
            name: "Mouse".to_string(),
            description: "Wireless".to_string(),
            price: dec!(19.99),
            stock: -1,
        };
        assert!(create.validate().is_err());
    }

    #[test]
    fn test_search_query_must_be_nonempty() {
        let empty = SearchQuery {
            query: String::new(),
        };
        assert!(empty.validate().is_err());

        let present = SearchQuery {
            query: "key".to_string(),
        };
        assert!(present.validate().is_ok());
    }

    #[test]
    fn test_filter_query_fields_are_optional() {
        let query: FilterQuery = serde_json::from_str("{}").unwrap();
        assert!(query.min_price.is_none());
        assert!(query.max_price.is_none());
        assert!(query.min_stock.is_none());
    }
}
