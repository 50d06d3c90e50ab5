//! Application Layer
//!
//! Use cases for categories and news articles.

pub mod articles;
pub mod categories;

// Re-exports
pub use articles::{ArticleInput, ArticleUseCase};
pub use categories::{CategoryInput, CategoryUseCase};
