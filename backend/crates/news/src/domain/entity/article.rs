//! News Article Entity

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, CategoryId, UserId};

use crate::domain::value_object::article_title::ArticleTitle;

#[derive(Debug, Clone)]
pub struct Article {
    pub article_id: ArticleId,
    pub title: ArticleTitle,
    pub content: Option<String>,
    /// Publication state; opaque to the backend
    pub status: i32,
    /// Author, references `users.id`
    pub owner_id: UserId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Writable fields, used for both create and full update
///
/// Owner and category references are checked by the database.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: ArticleTitle,
    pub content: Option<String>,
    pub status: i32,
    pub owner_id: UserId,
    pub category_id: CategoryId,
}
