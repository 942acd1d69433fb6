//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository and token-service
//! abstractions for dependency inversion.

mod auth_service;
mod post_service;
mod token_service;

pub use auth_service::{AuthService, Authenticator};
pub use post_service::{PostManager, PostService};
pub use token_service::{Claims, JwtTokens, TokenResponse, TokenService};
