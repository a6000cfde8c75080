use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Error types for cart operations
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Product not found")]
    ProductNotFound,

    #[error("Item not found in cart")]
    ItemNotFound,

    #[error("Invalid product ID")]
    InvalidId,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for CartError {
    fn from(err: sqlx::Error) -> Self {
        CartError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            CartError::DatabaseError(msg) => {
                error!("Database error in cart: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            CartError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "Product not found".to_string())
            }
            CartError::ItemNotFound => (
                StatusCode::NOT_FOUND,
                "Item not found in cart".to_string(),
            ),
            CartError::InvalidId => (StatusCode::BAD_REQUEST, "Invalid product ID".to_string()),
            CartError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
