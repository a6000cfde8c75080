// Orders module
// Order placement from the subject's cart, and order history

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::OrderError;
pub use models::{Order, OrderItem, OrderItemResponse, OrderResponse};
pub use repository::{OrderStore, OrdersRepository};
pub use service::OrderService;
