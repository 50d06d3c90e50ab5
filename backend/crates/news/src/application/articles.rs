//! Article Use Case

use std::sync::Arc;

use kernel::id::{ArticleId, CategoryId, UserId};
use kernel::pagination::{ListQuery, PageSource, Paginated, resolve};

use crate::domain::entity::article::{Article, ArticleDraft};
use crate::domain::repository::ArticleRepository;
use crate::domain::value_object::article_title::ArticleTitle;
use crate::error::{NewsError, NewsResult};

/// Create/update input
pub struct ArticleInput {
    pub title: String,
    pub content: Option<String>,
    pub status: i32,
    pub owner_id: i64,
    pub category_id: i64,
}

impl ArticleInput {
    fn into_draft(self) -> NewsResult<ArticleDraft> {
        let title = ArticleTitle::new(&self.title).map_err(|e| NewsError::Validation(e.to_string()))?;
        Ok(ArticleDraft {
            title,
            content: self.content,
            status: self.status,
            owner_id: UserId::new(self.owner_id),
            category_id: CategoryId::new(self.category_id),
        })
    }
}

pub struct ArticleUseCase<R>
where
    R: ArticleRepository + PageSource<Article, Error = NewsError>,
{
    repo: Arc<R>,
}

impl<R> ArticleUseCase<R>
where
    R: ArticleRepository + PageSource<Article, Error = NewsError>,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn all(&self) -> NewsResult<Vec<Article>> {
        self.repo.find_all().await
    }

    /// Paginated list searching title, author name and category name,
    /// newest first
    pub async fn list(&self, query: &ListQuery) -> NewsResult<Paginated<Article>> {
        resolve(self.repo.as_ref(), query).await
    }

    pub async fn detail(&self, article_id: ArticleId) -> NewsResult<Article> {
        self.repo
            .find_by_id(article_id)
            .await?
            .ok_or(NewsError::ArticleNotFound)
    }

    pub async fn create(&self, input: ArticleInput) -> NewsResult<Article> {
        let draft = input.into_draft()?;
        let article = self.repo.insert(&draft).await?;

        tracing::info!(
            article_id = %article.article_id,
            owner_id = %article.owner_id,
            category_id = %article.category_id,
            "Article created"
        );

        Ok(article)
    }

    pub async fn update(&self, article_id: ArticleId, input: ArticleInput) -> NewsResult<Article> {
        let draft = input.into_draft()?;
        let article = self
            .repo
            .update(article_id, &draft)
            .await?
            .ok_or(NewsError::ArticleNotFound)?;

        tracing::info!(article_id = %article.article_id, "Article updated");

        Ok(article)
    }

    pub async fn delete(&self, article_id: ArticleId) -> NewsResult<Article> {
        let article = self
            .repo
            .delete(article_id)
            .await?
            .ok_or(NewsError::ArticleNotFound)?;

        tracing::info!(article_id = %article.article_id, "Article deleted");

        Ok(article)
    }
}
