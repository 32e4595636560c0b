//! Bearer-token authentication.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{create_token, validate_token};
pub use middleware::{auth_middleware, AuthState};
pub use models::{AuthContext, JwtClaims};
