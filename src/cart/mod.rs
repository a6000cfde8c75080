// Shopping cart module
// Per-subject cart operations; every route is scoped to the token subject

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

pub use error::CartError;
pub use models::{AddToCartRequest, CartItemView, CartLine};
pub use repository::CartRepository;
