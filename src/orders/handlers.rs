// HTTP handlers for order endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::middleware::AuthenticatedUser;
use crate::orders::error::OrderError;
use crate::orders::models::OrderResponse;
use crate::AppState;

/// Handler for POST /orders
/// Places an order from the authenticated subject's cart
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<(StatusCode, Json<OrderResponse>), OrderError> {
    let order = state.order_service.place(&user.username).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// Handler for GET /orders
/// Retrieves order history for the authenticated subject
pub async fn get_orders(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<OrderResponse>>, OrderError> {
    let orders = state.order_service.history(&user.username).await?;

    Ok(Json(orders))
}
