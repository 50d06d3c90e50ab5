//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the token service
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, access guard
//!
//! ## Features
//! - Registration and login by phone number + password
//! - Stateless HS256 bearer tokens (30 min access, 7 day refresh)
//! - Access guard middleware reusable by other crates' routers
//! - User administration (list, detail, create, update, delete)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never serialized outward
//! - Unknown phone and wrong password are indistinguishable to callers
//! - Separate secrets for access and refresh tokens

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token_service::{AuthenticatedUser, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AccessGuardState, require_access_token};
pub use presentation::router::auth_router;
