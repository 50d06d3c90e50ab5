//! News Router

use std::sync::Arc;

use auth::{AccessGuardState, require_access_token};
use axum::{Router, middleware, routing::get};

use crate::domain::repository::{ArticleStore, CategoryStore};
use crate::presentation::handlers::{self, ArticleAppState, CategoryAppState};

/// Create the category and news routers, every route behind the access guard
///
/// - `/category`, `/category/list`, `/category/{id}`
/// - `/news`, `/news/list`, `/news/{id}`
pub fn news_router<C, A>(categories: C, articles: A, guard: AccessGuardState) -> Router
where
    C: CategoryStore,
    A: ArticleStore,
{
    let category = Router::new()
        .route(
            "/",
            get(handlers::list_all_categories::<C>).post(handlers::create_category::<C>),
        )
        .route("/list", get(handlers::list_categories::<C>))
        .route(
            "/{id}",
            get(handlers::get_category::<C>)
                .put(handlers::update_category::<C>)
                .delete(handlers::delete_category::<C>),
        )
        .route_layer(middleware::from_fn_with_state(
            guard.clone(),
            require_access_token,
        ))
        .with_state(CategoryAppState {
            repo: Arc::new(categories),
        });

    let news = Router::new()
        .route(
            "/",
            get(handlers::list_all_articles::<A>).post(handlers::create_article::<A>),
        )
        .route("/list", get(handlers::list_articles::<A>))
        .route(
            "/{id}",
            get(handlers::get_article::<A>)
                .put(handlers::update_article::<A>)
                .delete(handlers::delete_article::<A>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_access_token))
        .with_state(ArticleAppState {
            repo: Arc::new(articles),
        });

    Router::new()
        .nest("/category", category)
        .nest("/news", news)
}
