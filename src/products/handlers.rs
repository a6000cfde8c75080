// HTTP handlers for product catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{middleware::AuthenticatedUser, models::Role};
use crate::error::ApiError;
use crate::products::models::{CreateProduct, FilterQuery, Product, SearchQuery, UpdateProduct};
use crate::AppState;

/// Upper price bound applied when the filter omits max_price
const DEFAULT_MAX_PRICE: i64 = 999_999;

/// Parse a caller-supplied identifier before any store access.
/// Malformed input is a client error, never a server error.
fn parse_product_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidIdentifier {
        value: raw.to_string(),
    })
}

/// Handler for POST /products
/// Creates a new product (admin only)
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, description = "Invalid input data"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_token" = [])),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    user.require_role(Role::Admin)?;

    payload.validate()?;

    let product = state.product_repo.create(&payload).await?;

    tracing::info!("Successfully created product with id: {}", product.id);
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products
/// Retrieves the full catalog (public)
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "List of all products", body = Vec<Product>),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn get_all_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    tracing::debug!("Fetching all products");

    let products = state.product_repo.find_all().await?;

    tracing::debug!("Retrieved {} products", products.len());
    Ok(Json(products))
}

/// Handler for GET /products/search?query=
/// Case-insensitive substring search over name and description (public)
#[utoipa::path(
    get,
    path = "/products/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, description = "Empty search query"),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    params.validate()?;

    tracing::debug!("Searching products for: {}", params.query);

    let products = state.product_repo.search(&params.query).await?;

    Ok(Json(products))
}

/// Handler for GET /products/filter
/// Price range and minimum stock filter (public)
#[utoipa::path(
    get,
    path = "/products/filter",
    params(FilterQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn filter_products(
    State(state): State<AppState>,
    Query(params): Query<FilterQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let min_price = params.min_price.unwrap_or(Decimal::ZERO);
    let max_price = params
        .max_price
        .unwrap_or_else(|| Decimal::from(DEFAULT_MAX_PRICE));
    let min_stock = params.min_stock.unwrap_or(0);

    let products = state
        .product_repo
        .filter(min_price, max_price, min_stock)
        .await?;

    Ok(Json(products))
}

/// Handler for GET /products/:id
/// Retrieves a specific product by ID (public)
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Malformed product ID"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_product_id(&raw_id)?;

    let product = state
        .product_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Product".to_string(),
            id: raw_id.clone(),
        })?;

    Ok(Json(product))
}

/// Handler for PUT /products/:id
/// Replaces an existing product (admin only)
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully"),
        (status = 400, description = "Invalid input data or malformed ID"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_token" = [])),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(raw_id): Path<String>,
    Json(payload): Json<UpdateProduct>,
) -> Result<StatusCode, ApiError> {
    user.require_role(Role::Admin)?;

    let id = parse_product_id(&raw_id)?;
    payload.validate()?;

    let matched = state.product_repo.update(id, &payload).await?;
    if matched == 0 {
        return Err(ApiError::NotFound {
            resource: "Product".to_string(),
            id: raw_id,
        });
    }

    tracing::info!("Successfully updated product with id: {}", id);
    Ok(StatusCode::OK)
}

/// Handler for DELETE /products/:id
/// Deletes a product (admin only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, description = "Malformed product ID"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_token" = [])),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    user.require_role(Role::Admin)?;

    let id = parse_product_id(&raw_id)?;

    let deleted = state.product_repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound {
            resource: "Product".to_string(),
            id: raw_id,
        });
    }

    tracing::info!("Successfully deleted product with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
