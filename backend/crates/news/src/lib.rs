//! News Backend Module
//!
//! Categories and news articles: CRUD plus paginated, searchable listings.
//! Every route sits behind the auth crate's access guard.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{NewsError, NewsResult};
pub use infra::postgres::{PgArticleRepository, PgCategoryRepository};
pub use presentation::router::news_router;
