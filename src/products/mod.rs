// Product catalog module
// Public listing, search, and filtering; admin-gated create/update/delete

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{CreateProduct, FilterQuery, Product, SearchQuery, UpdateProduct};
pub use repository::ProductRepository;
