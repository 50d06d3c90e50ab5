//! Application Layer
//!
//! Use cases and application services.

pub mod authorize;
pub mod config;
pub mod login;
pub mod manage_users;
pub mod register;
pub mod token_service;

// Re-exports
pub use authorize::AuthorizeUseCase;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use manage_users::{CreateUserInput, UpdateUserInput, UserAdminUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token_service::{AuthenticatedUser, TokenService};
