//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{article::Article, category::Category};

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.category_id.value(),
            name: category.name.as_str().to_string(),
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Create and update request
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Articles
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub status: i32,
    pub owner_id: i64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Article> for ArticleView {
    fn from(article: Article) -> Self {
        Self {
            id: article.article_id.value(),
            title: article.title.as_str().to_string(),
            content: article.content,
            status: article.status,
            owner_id: article.owner_id.value(),
            category_id: article.category_id.value(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Create and update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub status: i32,
    pub owner_id: i64,
    pub category_id: i64,
}
