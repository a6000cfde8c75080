// Shopping cart data models and DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Request DTO for adding a product to the cart.
/// The product id is parsed explicitly before any store access.
#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    pub product_id: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// A cart row joined with its product
#[derive(Debug, Clone, FromRow)]
pub struct CartLine {
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Response DTO for viewing the cart
#[derive(Debug, Serialize, Deserialize)]
pub struct CartItemView {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl From<CartLine> for CartItemView {
    fn from(line: CartLine) -> Self {
        Self {
            name: line.name,
            price: line.price,
            quantity: line.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use validator::Validate;

    #[test]
    fn test_add_request_requires_positive_quantity() {
        let zero = AddToCartRequest {
            product_id: Uuid::nil().to_string(),
            quantity: 0,
        };
        assert!(zero.validate().is_err());

        let negative = AddToCartRequest {
            product_id: Uuid::nil().to_string(),
            quantity: -3,
        };
        assert!(negative.validate().is_err());

        let one = AddToCartRequest {
            product_id: Uuid::nil().to_string(),
            quantity: 1,
        };
        assert!(one.validate().is_ok());
    }

    #[test]
    fn test_cart_item_view_from_line() {
        let line = CartLine {
            product_id: Uuid::nil(),
            name: "Mouse".to_string(),
            price: dec!(19.99),
            quantity: 2,
        };

        let view = CartItemView::from(line);
        assert_eq!(view.name, "Mouse");
        assert_eq!(view.price, dec!(19.99));
        assert_eq!(view.quantity, 2);
    }
}
