//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Paginated listing goes through `kernel::pagination::PageSource`.

use kernel::id::{ArticleId, CategoryId};
use kernel::pagination::PageSource;

use crate::domain::entity::article::{Article, ArticleDraft};
use crate::domain::entity::category::{Category, CategoryDraft};
use crate::error::{NewsError, NewsResult};

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn find_all(&self) -> NewsResult<Vec<Category>>;

    async fn find_by_id(&self, category_id: CategoryId) -> NewsResult<Option<Category>>;

    async fn insert(&self, draft: &CategoryDraft) -> NewsResult<Category>;

    /// `None` when no such category
    async fn update(
        &self,
        category_id: CategoryId,
        draft: &CategoryDraft,
    ) -> NewsResult<Option<Category>>;

    /// `None` when no such category
    async fn delete(&self, category_id: CategoryId) -> NewsResult<Option<Category>>;
}

/// Article repository trait
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    async fn find_all(&self) -> NewsResult<Vec<Article>>;

    async fn find_by_id(&self, article_id: ArticleId) -> NewsResult<Option<Article>>;

    async fn insert(&self, draft: &ArticleDraft) -> NewsResult<Article>;

    /// `None` when no such article
    async fn update(&self, article_id: ArticleId, draft: &ArticleDraft)
    -> NewsResult<Option<Article>>;

    /// `None` when no such article
    async fn delete(&self, article_id: ArticleId) -> NewsResult<Option<Article>>;
}

/// Everything the HTTP layer needs from a category store
pub trait CategoryStore:
    CategoryRepository + PageSource<Category, Error = NewsError> + Send + Sync + 'static
{
}

impl<T> CategoryStore for T where
    T: CategoryRepository + PageSource<Category, Error = NewsError> + Send + Sync + 'static
{
}

/// Everything the HTTP layer needs from an article store
pub trait ArticleStore:
    ArticleRepository + PageSource<Article, Error = NewsError> + Send + Sync + 'static
{
}

impl<T> ArticleStore for T where
    T: ArticleRepository + PageSource<Article, Error = NewsError> + Send + Sync + 'static
{
}
