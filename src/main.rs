pub mod auth;
pub mod cart;
pub mod config;
pub mod db;
pub mod error;
pub mod orders;
pub mod products;
pub mod validation;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, TokenService, UserRepository};
use cart::CartRepository;
use config::AuthConfig;
use orders::{OrderService, OrdersRepository};
use products::{CreateProduct, Product, ProductRepository, UpdateProduct};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        products::handlers::create_product,
        products::handlers::get_all_products,
        products::handlers::search_products,
        products::handlers::filter_products,
        products::handlers::get_product,
        products::handlers::update_product,
        products::handlers::delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "products", description = "Product catalog endpoints")
    ),
    info(
        title = "ShopFast API",
        version = "1.0.0",
        description = "Storefront backend with JWT authentication, catalog, cart, and orders"
    )
)]
struct ApiDoc;

/// Registers the bearer-token security scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub product_repo: ProductRepository,
    pub cart_repo: CartRepository,
    pub order_service: Arc<OrderService>,
}

/// Lets the auth gate pull the token service straight from router state
impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.token_service.clone()
    }
}

/// Handler for GET /
async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to ShopFast" }))
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(db: PgPool, auth_config: &AuthConfig) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let token_service = Arc::new(TokenService::new(auth_config));
    let auth_service = Arc::new(AuthService::new(
        UserRepository::new(db.clone()),
        token_service.clone(),
    ));

    let state = AppState {
        product_repo: ProductRepository::new(db.clone()),
        cart_repo: CartRepository::new(db.clone()),
        order_service: Arc::new(OrderService::new(OrdersRepository::new(db))),
        token_service,
        auth_service,
    };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(home))
        // Auth routes (no token required; none exists yet)
        .route("/auth/register", post(auth::handlers::register_handler))
        .route("/auth/login", post(auth::handlers::login_handler))
        // Profile routes
        .route("/user/profile", get(auth::handlers::profile_handler))
        .route(
            "/user/profile/full",
            get(auth::handlers::full_profile_handler),
        )
        .route("/user/update", put(auth::handlers::update_profile_handler))
        .route(
            "/user/change-password",
            put(auth::handlers::change_password_handler),
        )
        .route("/user/admin-only", get(auth::handlers::admin_area_handler))
        // Product catalog
        .route("/products", post(products::handlers::create_product))
        .route("/products", get(products::handlers::get_all_products))
        .route("/products/search", get(products::handlers::search_products))
        .route("/products/filter", get(products::handlers::filter_products))
        .route("/products/:id", get(products::handlers::get_product))
        .route("/products/:id", put(products::handlers::update_product))
        .route("/products/:id", delete(products::handlers::delete_product))
        // Cart
        .route("/cart/add", post(cart::handlers::add_to_cart))
        .route("/cart", get(cart::handlers::view_cart))
        .route("/cart/:product_id", delete(cart::handlers::remove_from_cart))
        // Orders
        .route("/orders", post(orders::handlers::place_order))
        .route("/orders", get(orders::handlers::get_orders))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("ShopFast API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Signing secret and algorithm have no defaults; fail fast here rather
    // than falling back silently at verification time
    let auth_config = AuthConfig::from_env()
        .expect("Auth configuration must be set (JWT_SECRET, JWT_ALGORITHM)");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(db_pool, &auth_config);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("ShopFast API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
