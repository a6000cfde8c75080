// Authentication module
// Provides JWT-based authentication with registration, login, profile
// management, and role-based authorization

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use middleware::AuthenticatedUser;
pub use models::{
    ChangePasswordRequest, LoginRequest, MessageResponse, ProfileResponse, RegisterRequest, Role,
    TokenResponse, UpdateProfileRequest, User, UserResponse,
};
pub use repository::{IdentityStore, UserRepository};
pub use service::AuthService;
pub use token::{Claims, TokenService};
