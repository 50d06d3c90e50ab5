//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::{ArticleId, CategoryId};
use kernel::pagination::{ListQuery, Paginated};
use kernel::response::Message;

use crate::application::{ArticleInput, ArticleUseCase, CategoryInput, CategoryUseCase};
use crate::domain::repository::{ArticleStore, CategoryStore};
use crate::error::NewsResult;
use crate::presentation::dto::{ArticleRequest, ArticleView, CategoryRequest, CategoryView};
use crate::presentation::extract::JsonBody;

/// Shared state for category handlers
pub struct CategoryAppState<C: CategoryStore> {
    pub repo: Arc<C>,
}

impl<C: CategoryStore> Clone for CategoryAppState<C> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<C: CategoryStore> CategoryAppState<C> {
    fn use_case(&self) -> CategoryUseCase<C> {
        CategoryUseCase::new(self.repo.clone())
    }
}

/// Shared state for article handlers
pub struct ArticleAppState<A: ArticleStore> {
    pub repo: Arc<A>,
}

impl<A: ArticleStore> Clone for ArticleAppState<A> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<A: ArticleStore> ArticleAppState<A> {
    fn use_case(&self) -> ArticleUseCase<A> {
        ArticleUseCase::new(self.repo.clone())
    }
}

// ============================================================================
// Categories
// ============================================================================

/// GET /api/category
pub async fn list_all_categories<C: CategoryStore>(
    State(state): State<CategoryAppState<C>>,
) -> NewsResult<Json<Vec<CategoryView>>> {
    let categories = state.use_case().all().await?;
    Ok(Json(categories.into_iter().map(CategoryView::from).collect()))
}

/// GET /api/category/list
pub async fn list_categories<C: CategoryStore>(
    State(state): State<CategoryAppState<C>>,
    Query(query): Query<ListQuery>,
) -> NewsResult<Json<Paginated<CategoryView>>> {
    let page = state.use_case().list(&query).await?;
    Ok(Json(page.map(CategoryView::from)))
}

/// GET /api/category/{id}
pub async fn get_category<C: CategoryStore>(
    State(state): State<CategoryAppState<C>>,
    Path(id): Path<i64>,
) -> NewsResult<Json<CategoryView>> {
    let category = state.use_case().detail(CategoryId::new(id)).await?;
    Ok(Json(CategoryView::from(category)))
}

/// POST /api/category
pub async fn create_category<C: CategoryStore>(
    State(state): State<CategoryAppState<C>>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> NewsResult<(StatusCode, Json<Message<CategoryView>>)> {
    let category = state
        .use_case()
        .create(CategoryInput {
            name: req.name,
            description: req.description,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Message::with_data(
            format!("Created category {}", category.name),
            CategoryView::from(category),
        )),
    ))
}

/// PUT /api/category/{id}
pub async fn update_category<C: CategoryStore>(
    State(state): State<CategoryAppState<C>>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> NewsResult<Json<Message<CategoryView>>> {
    let category = state
        .use_case()
        .update(
            CategoryId::new(id),
            CategoryInput {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(Message::with_data(
        format!("Updated category {}", category.name),
        CategoryView::from(category),
    )))
}

/// DELETE /api/category/{id}
pub async fn delete_category<C: CategoryStore>(
    State(state): State<CategoryAppState<C>>,
    Path(id): Path<i64>,
) -> NewsResult<Json<Message<()>>> {
    let category = state.use_case().delete(CategoryId::new(id)).await?;
    Ok(Json(Message::text(format!(
        "Deleted category {}",
        category.name
    ))))
}

// ============================================================================
// Articles
// ============================================================================

/// GET /api/news
pub async fn list_all_articles<A: ArticleStore>(
    State(state): State<ArticleAppState<A>>,
) -> NewsResult<Json<Vec<ArticleView>>> {
    let articles = state.use_case().all().await?;
    Ok(Json(articles.into_iter().map(ArticleView::from).collect()))
}

/// GET /api/news/list
pub async fn list_articles<A: ArticleStore>(
    State(state): State<ArticleAppState<A>>,
    Query(query): Query<ListQuery>,
) -> NewsResult<Json<Paginated<ArticleView>>> {
    let page = state.use_case().list(&query).await?;
    Ok(Json(page.map(ArticleView::from)))
}

/// GET /api/news/{id}
pub async fn get_article<A: ArticleStore>(
    State(state): State<ArticleAppState<A>>,
    Path(id): Path<i64>,
) -> NewsResult<Json<ArticleView>> {
    let article = state.use_case().detail(ArticleId::new(id)).await?;
    Ok(Json(ArticleView::from(article)))
}

/// POST /api/news
pub async fn create_article<A: ArticleStore>(
    State(state): State<ArticleAppState<A>>,
    JsonBody(req): JsonBody<ArticleRequest>,
) -> NewsResult<(StatusCode, Json<Message<ArticleView>>)> {
    let article = state.use_case().create(article_input(req)).await?;

    Ok((
        StatusCode::CREATED,
        Json(Message::with_data(
            format!("Created article {}", article.title),
            ArticleView::from(article),
        )),
    ))
}

/// PUT /api/news/{id}
pub async fn update_article<A: ArticleStore>(
    State(state): State<ArticleAppState<A>>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<ArticleRequest>,
) -> NewsResult<Json<Message<ArticleView>>> {
    let article = state
        .use_case()
        .update(ArticleId::new(id), article_input(req))
        .await?;

    Ok(Json(Message::with_data(
        format!("Updated article {}", article.title),
        ArticleView::from(article),
    )))
}

/// DELETE /api/news/{id}
pub async fn delete_article<A: ArticleStore>(
    State(state): State<ArticleAppState<A>>,
    Path(id): Path<i64>,
) -> NewsResult<Json<Message<()>>> {
    let article = state.use_case().delete(ArticleId::new(id)).await?;
    Ok(Json(Message::text(format!("Deleted article {}", article.title))))
}

fn article_input(req: ArticleRequest) -> ArticleInput {
    ArticleInput {
        title: req.title,
        content: req.content,
        status: req.status,
        owner_id: req.owner_id,
        category_id: req.category_id,
    }
}
