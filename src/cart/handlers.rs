// HTTP handlers for cart endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::auth::models::MessageResponse;
use crate::cart::error::CartError;
use crate::cart::models::{AddToCartRequest, CartItemView};
use crate::AppState;

/// Handler for POST /cart/add
/// Adds a product to the authenticated subject's cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<MessageResponse>, CartError> {
    request
        .validate()
        .map_err(|e| CartError::ValidationError(e.to_string()))?;

    let product_id = Uuid::parse_str(&request.product_id).map_err(|_| CartError::InvalidId)?;

    if !state.cart_repo.product_exists(product_id).await? {
        return Err(CartError::ProductNotFound);
    }

    state
        .cart_repo
        .add_item(&user.username, product_id, request.quantity)
        .await?;

    Ok(Json(MessageResponse {
        message: "Item added to cart".to_string(),
    }))
}

/// Handler for GET /cart
/// Views the authenticated subject's cart
pub async fn view_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<CartItemView>>, CartError> {
    let lines = state.cart_repo.lines(&user.username).await?;

    Ok(Json(lines.into_iter().map(CartItemView::from).collect()))
}

/// Handler for DELETE /cart/:product_id
/// Removes a product from the authenticated subject's cart
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, CartError> {
    let product_id = Uuid::parse_str(&raw_id).map_err(|_| CartError::InvalidId)?;

    let removed = state
        .cart_repo
        .remove_item(&user.username, product_id)
        .await?;
    if removed == 0 {
        return Err(CartError::ItemNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Item removed from cart".to_string(),
    }))
}
