//! Use-case and router tests for the news crate
//!
//! Runs against in-memory stores; no database required.

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone, Utc};
    use kernel::id::{ArticleId, CategoryId};
    use kernel::pagination::PageSource;

    use crate::domain::entity::article::{Article, ArticleDraft};
    use crate::domain::entity::category::{Category, CategoryDraft};
    use crate::domain::repository::{ArticleRepository, CategoryRepository};
    use crate::error::{NewsError, NewsResult};

    fn created_at(id: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id)
    }

    fn dangling_reference() -> NewsError {
        NewsError::Storage(sqlx::Error::Protocol(
            "violates foreign key constraint".to_string(),
        ))
    }

    // ------------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------------

    #[derive(Default)]
    pub struct MemoryCategories {
        categories: Mutex<Vec<Category>>,
    }

    impl MemoryCategories {
        fn matching(&self, search: &str) -> Vec<Category> {
            // Highest id first
            let mut found: Vec<Category> = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.name.as_str().contains(search))
                .cloned()
                .collect();
            found.sort_by_key(|c| std::cmp::Reverse(c.category_id.value()));
            found
        }
    }

    impl CategoryRepository for MemoryCategories {
        async fn find_all(&self) -> NewsResult<Vec<Category>> {
            Ok(self.matching(""))
        }

        async fn find_by_id(&self, category_id: CategoryId) -> NewsResult<Option<Category>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.category_id == category_id)
                .cloned())
        }

        async fn insert(&self, draft: &CategoryDraft) -> NewsResult<Category> {
            let mut categories = self.categories.lock().unwrap();
            let id = categories.len() as i64 + 1;
            let category = Category {
                category_id: CategoryId::new(id),
                name: draft.name.clone(),
                description: draft.description.clone(),
                created_at: created_at(id),
                updated_at: None,
            };
            categories.push(category.clone());
            Ok(category)
        }

        async fn update(
            &self,
            category_id: CategoryId,
            draft: &CategoryDraft,
        ) -> NewsResult<Option<Category>> {
            let mut categories = self.categories.lock().unwrap();
            let Some(category) = categories.iter_mut().find(|c| c.category_id == category_id)
            else {
                return Ok(None);
            };
            category.name = draft.name.clone();
            category.description = draft.description.clone();
            category.updated_at = Some(Utc::now());
            Ok(Some(category.clone()))
        }

        async fn delete(&self, category_id: CategoryId) -> NewsResult<Option<Category>> {
            let mut categories = self.categories.lock().unwrap();
            let position = categories.iter().position(|c| c.category_id == category_id);
            Ok(position.map(|i| categories.remove(i)))
        }
    }

    impl PageSource<Category> for MemoryCategories {
        type Error = NewsError;

        async fn count_matching(&self, search: &str) -> NewsResult<u64> {
            Ok(self.matching(search).len() as u64)
        }

        async fn fetch_page(
            &self,
            search: &str,
            offset: u64,
            limit: u64,
        ) -> NewsResult<Vec<Category>> {
            Ok(self
                .matching(search)
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }
    }

    // ------------------------------------------------------------------------
    // Articles
    // ------------------------------------------------------------------------

    /// Articles plus the owner and category names a join would provide
    #[derive(Default)]
    pub struct MemoryArticles {
        articles: Mutex<Vec<Article>>,
        owners: HashMap<i64, String>,
        categories: HashMap<i64, String>,
    }

    impl MemoryArticles {
        pub fn with_references(owners: &[(i64, &str)], categories: &[(i64, &str)]) -> Self {
            Self {
                articles: Mutex::default(),
                owners: owners.iter().map(|(id, n)| (*id, n.to_string())).collect(),
                categories: categories
                    .iter()
                    .map(|(id, n)| (*id, n.to_string()))
                    .collect(),
            }
        }

        fn check_references(&self, draft: &ArticleDraft) -> NewsResult<()> {
            if !self.owners.contains_key(&draft.owner_id.value())
                || !self.categories.contains_key(&draft.category_id.value())
            {
                return Err(dangling_reference());
            }
            Ok(())
        }

        fn matching(&self, search: &str) -> Vec<Article> {
            // Newest first
            self.articles
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|a| {
                    a.title.as_str().contains(search)
                        || self.owners[&a.owner_id.value()].contains(search)
                        || self.categories[&a.category_id.value()].contains(search)
                })
                .cloned()
                .collect()
        }
    }

    impl ArticleRepository for MemoryArticles {
        async fn find_all(&self) -> NewsResult<Vec<Article>> {
            Ok(self.matching(""))
        }

        async fn find_by_id(&self, article_id: ArticleId) -> NewsResult<Option<Article>> {
            Ok(self
                .articles
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.article_id == article_id)
                .cloned())
        }

        async fn insert(&self, draft: &ArticleDraft) -> NewsResult<Article> {
            self.check_references(draft)?;

            let mut articles = self.articles.lock().unwrap();
            let id = articles.len() as i64 + 1;
            let article = Article {
                article_id: ArticleId::new(id),
                title: draft.title.clone(),
                content: draft.content.clone(),
                status: draft.status,
                owner_id: draft.owner_id,
                category_id: draft.category_id,
                created_at: created_at(id),
                updated_at: None,
            };
            articles.push(article.clone());
            Ok(article)
        }

        async fn update(
            &self,
            article_id: ArticleId,
            draft: &ArticleDraft,
        ) -> NewsResult<Option<Article>> {
            self.check_references(draft)?;

            let mut articles = self.articles.lock().unwrap();
            let Some(article) = articles.iter_mut().find(|a| a.article_id == article_id) else {
                return Ok(None);
            };
            article.title = draft.title.clone();
            article.content = draft.content.clone();
            article.status = draft.status;
            article.owner_id = draft.owner_id;
            article.category_id = draft.category_id;
            article.updated_at = Some(Utc::now());
            Ok(Some(article.clone()))
        }

        async fn delete(&self, article_id: ArticleId) -> NewsResult<Option<Article>> {
            let mut articles = self.articles.lock().unwrap();
            let position = articles.iter().position(|a| a.article_id == article_id);
            Ok(position.map(|i| articles.remove(i)))
        }
    }

    impl PageSource<Article> for MemoryArticles {
        type Error = NewsError;

        async fn count_matching(&self, search: &str) -> NewsResult<u64> {
            Ok(self.matching(search).len() as u64)
        }

        async fn fetch_page(
            &self,
            search: &str,
            offset: u64,
            limit: u64,
        ) -> NewsResult<Vec<Article>> {
            Ok(self
                .matching(search)
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }
    }
}

#[cfg(test)]
mod category_tests {
    use std::sync::Arc;

    use kernel::id::CategoryId;
    use kernel::pagination::ListQuery;

    use super::support::MemoryCategories;
    use crate::application::{CategoryInput, CategoryUseCase};
    use crate::error::NewsError;

    fn use_case() -> CategoryUseCase<MemoryCategories> {
        CategoryUseCase::new(Arc::new(MemoryCategories::default()))
    }

    fn input(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let categories = use_case();
        assert!(matches!(
            categories.create(input("   ")).await,
            Err(NewsError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_list_orders_by_id_desc_and_searches_name() {
        let categories = use_case();
        for name in ["Thể thao", "Kinh tế", "Thể giới", "Giải trí"] {
            categories.create(input(name)).await.unwrap();
        }

        let all = categories.list(&ListQuery::default()).await.unwrap();
        assert_eq!(all.total, 4);
        assert_eq!(all.data[0].name.as_str(), "Giải trí");

        let matching = categories
            .list(&ListQuery {
                search: Some("Thể".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = matching.data.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Thể giới", "Thể thao"]);
        assert_eq!(matching.total, 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let categories = use_case();
        let created = categories.create(input("Thể thao")).await.unwrap();

        let updated = categories
            .update(
                created.category_id,
                CategoryInput {
                    name: "Bóng đá".to_string(),
                    description: Some("Tin bóng đá".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_str(), "Bóng đá");
        assert_eq!(updated.description.as_deref(), Some("Tin bóng đá"));

        categories.delete(created.category_id).await.unwrap();
        assert!(matches!(
            categories.detail(created.category_id).await,
            Err(NewsError::CategoryNotFound)
        ));
    }

    #[tokio::test]
    async fn test_missing_category_is_not_found() {
        let categories = use_case();
        let missing = CategoryId::new(9);
        assert!(matches!(
            categories.update(missing, input("Bóng đá")).await,
            Err(NewsError::CategoryNotFound)
        ));
        assert!(matches!(
            categories.delete(missing).await,
            Err(NewsError::CategoryNotFound)
        ));
    }
}

#[cfg(test)]
mod article_tests {
    use std::sync::Arc;

    use kernel::pagination::ListQuery;

    use super::support::MemoryArticles;
    use crate::application::{ArticleInput, ArticleUseCase};
    use crate::error::NewsError;

    fn use_case() -> ArticleUseCase<MemoryArticles> {
        ArticleUseCase::new(Arc::new(MemoryArticles::with_references(
            &[(1, "Nguyễn An"), (2, "Trần Bình")],
            &[(10, "Thể thao"), (20, "Kinh tế")],
        )))
    }

    fn input(title: &str, owner_id: i64, category_id: i64) -> ArticleInput {
        ArticleInput {
            title: title.to_string(),
            content: Some("Nội dung".to_string()),
            status: 1,
            owner_id,
            category_id,
        }
    }

    async fn seed(articles: &ArticleUseCase<MemoryArticles>) {
        articles.create(input("Giá vàng tăng", 1, 20)).await.unwrap();
        articles.create(input("Đội tuyển thắng", 2, 10)).await.unwrap();
        articles.create(input("Chứng khoán giảm", 2, 20)).await.unwrap();
    }

    #[tokio::test]
    async fn test_title_validation() {
        let articles = use_case();
        assert!(matches!(
            articles.create(input("", 1, 10)).await,
            Err(NewsError::Validation(_))
        ));
        assert!(matches!(
            articles.create(input(&"x".repeat(101), 1, 10)).await,
            Err(NewsError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_dangling_reference_is_storage_failure() {
        let articles = use_case();
        let err = articles.create(input("Tin mới", 99, 10)).await.unwrap_err();
        assert!(matches!(err, NewsError::Storage(_)));
        assert_eq!(err.to_app_error().status_code(), 400);
    }

    #[tokio::test]
    async fn test_search_matches_title_owner_and_category() {
        let articles = use_case();
        seed(&articles).await;

        let search = |term: &str| ListQuery {
            search: Some(term.to_string()),
            ..Default::default()
        };

        let by_title = articles.list(&search("vàng")).await.unwrap();
        assert_eq!(by_title.total, 1);

        let by_owner = articles.list(&search("Trần")).await.unwrap();
        assert_eq!(by_owner.total, 2);
        // Newest first
        assert_eq!(by_owner.data[0].title.as_str(), "Chứng khoán giảm");

        let by_category = articles.list(&search("Kinh tế")).await.unwrap();
        assert_eq!(by_category.total, 2);

        let nothing = articles.list(&search("thời tiết")).await.unwrap();
        assert_eq!(nothing.total, 0);
        assert!(nothing.data.is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_paging_falls_back_to_defaults() {
        let articles = use_case();
        seed(&articles).await;

        let page = articles
            .list(&ListQuery {
                page: Some("abc".to_string()),
                items_per_page: Some("-5".to_string()),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items_per_page, 10);
        assert_eq!(page.data.len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let articles = use_case();
        seed(&articles).await;

        let first = articles.all().await.unwrap().pop().unwrap();
        let updated = articles
            .update(first.article_id, input("Giá vàng giảm", 1, 20))
            .await
            .unwrap();
        assert_eq!(updated.title.as_str(), "Giá vàng giảm");
        assert!(updated.updated_at.is_some());

        articles.delete(first.article_id).await.unwrap();
        assert!(matches!(
            articles.delete(first.article_id).await,
            Err(NewsError::ArticleNotFound)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use auth::application::token_service::TokenService;
    use auth::domain::entity::claims::IdentityClaims;
    use auth::{AccessGuardState, AuthConfig};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::support::{MemoryArticles, MemoryCategories};
    use crate::presentation::router::news_router;

    fn app() -> (Router, String) {
        let tokens = Arc::new(TokenService::new(&AuthConfig::new("news-access", "news-refresh")));
        let token = tokens
            .issue_access(&IdentityClaims {
                id: 1,
                name: "Nguyễn An".to_string(),
                phone: "0358624125".to_string(),
            })
            .unwrap();

        let router = news_router(
            MemoryCategories::default(),
            MemoryArticles::with_references(&[(1, "Nguyễn An")], &[(1, "Thể thao")]),
            AccessGuardState::new(tokens),
        );
        (router, token)
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_every_route_requires_token() {
        let (app, _) = app();
        for uri in ["/category", "/category/list", "/category/1", "/news", "/news/list", "/news/1"] {
            let response = app
                .clone()
                .oneshot(request("GET", uri, None, None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_category_crud_messages() {
        let (app, token) = app();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/category",
                Some(&token),
                Some(serde_json::json!({"name": "Thể thao"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["message"], "Created category Thể thao");
        assert_eq!(created["data"]["id"], 1);

        let response = app
            .clone()
            .oneshot(request("DELETE", "/category/1", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let deleted = body_json(response).await;
        assert_eq!(deleted["message"], "Deleted category Thể thao");
        assert!(deleted.get("data").is_none());

        let response = app
            .oneshot(request("GET", "/category/1", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_news_create_and_list() {
        let (app, token) = app();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/news",
                Some(&token),
                Some(serde_json::json!({
                    "title": "Đội tuyển thắng",
                    "status": 1,
                    "ownerId": 1,
                    "categoryId": 1
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await["message"],
            "Created article Đội tuyển thắng"
        );

        let response = app
            .oneshot(request(
                "GET",
                "/news/list?page=1&items_per_page=5&search=Th%E1%BB%83",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_json(response).await;
        assert_eq!(page["total"], 1);
        assert_eq!(page["items_per_page"], 5);
        assert_eq!(page["data"][0]["categoryId"], 1);
    }

    #[tokio::test]
    async fn test_mistyped_body_field_is_validation_error() {
        let (app, token) = app();

        let response = app
            .oneshot(request(
                "POST",
                "/news",
                Some(&token),
                Some(serde_json::json!({
                    "title": "Đội tuyển thắng",
                    "status": "abc",
                    "ownerId": 1,
                    "categoryId": 1
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let problem = body_json(response).await;
        assert_eq!(problem["status"], 400);
        assert!(problem["detail"].as_str().unwrap().contains("status"));
    }
}
