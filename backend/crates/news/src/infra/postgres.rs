//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, CategoryId, UserId};
use kernel::pagination::{PageSource, SearchSpec, to_sql_bigint};
use sqlx::PgPool;

use crate::domain::entity::article::{Article, ArticleDraft};
use crate::domain::entity::category::{Category, CategoryDraft};
use crate::domain::repository::{ArticleRepository, CategoryRepository};
use crate::domain::value_object::{article_title::ArticleTitle, category_name::CategoryName};
use crate::error::{NewsError, NewsResult};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Search by name, highest id first
const CATEGORY_LISTING: SearchSpec = SearchSpec {
    from: "categories",
    columns: &["name"],
    order_by: "id DESC",
};

const ARTICLE_COLUMNS: &str =
    "id, title, content, status, owner_id, category_id, created_at, updated_at";

/// Article columns qualified for the joined listing query
const ARTICLE_LISTING_COLUMNS: &str = "n.id, n.title, n.content, n.status, n.owner_id, \
     n.category_id, n.created_at, n.updated_at";

/// Search by title, author name or category name, newest first
const ARTICLE_LISTING: SearchSpec = SearchSpec {
    from: "news n JOIN users u ON u.id = n.owner_id JOIN categories c ON c.id = n.category_id",
    columns: &["n.title", "u.name", "c.name"],
    order_by: "n.created_at DESC, n.id DESC",
};

// ============================================================================
// Categories
// ============================================================================

/// PostgreSQL-backed category repository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CategoryRepository for PgCategoryRepository {
    async fn find_all(&self) -> NewsResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn find_by_id(&self, category_id: CategoryId) -> NewsResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(category_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn insert(&self, draft: &CategoryDraft) -> NewsResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(draft.name.as_str())
        .bind(draft.description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_category())
    }

    async fn update(
        &self,
        category_id: CategoryId,
        draft: &CategoryDraft,
    ) -> NewsResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            r#"
            UPDATE categories SET
                name = $2,
                description = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CATEGORY_COLUMNS}
            "#
        ))
        .bind(category_id.value())
        .bind(draft.name.as_str())
        .bind(draft.description.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn delete(&self, category_id: CategoryId) -> NewsResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "DELETE FROM categories WHERE id = $1 RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }
}

impl PageSource<Category> for PgCategoryRepository {
    type Error = NewsError;

    async fn count_matching(&self, search: &str) -> NewsResult<u64> {
        let total = sqlx::query_scalar::<_, i64>(&CATEGORY_LISTING.count_sql())
            .bind(search)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn fetch_page(&self, search: &str, offset: u64, limit: u64) -> NewsResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&CATEGORY_LISTING.page_sql(CATEGORY_COLUMNS))
            .bind(search)
            .bind(to_sql_bigint(limit))
            .bind(to_sql_bigint(offset))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }
}

// ============================================================================
// Articles
// ============================================================================

/// PostgreSQL-backed news article repository
#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ArticleRepository for PgArticleRepository {
    async fn find_all(&self) -> NewsResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM news ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ArticleRow::into_article).collect())
    }

    async fn find_by_id(&self, article_id: ArticleId) -> NewsResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM news WHERE id = $1"
        ))
        .bind(article_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleRow::into_article))
    }

    async fn insert(&self, draft: &ArticleDraft) -> NewsResult<Article> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            INSERT INTO news (title, content, status, owner_id, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(draft.title.as_str())
        .bind(draft.content.as_deref())
        .bind(draft.status)
        .bind(draft.owner_id.value())
        .bind(draft.category_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_article())
    }

    async fn update(
        &self,
        article_id: ArticleId,
        draft: &ArticleDraft,
    ) -> NewsResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            r#"
            UPDATE news SET
                title = $2,
                content = $3,
                status = $4,
                owner_id = $5,
                category_id = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ARTICLE_COLUMNS}
            "#
        ))
        .bind(article_id.value())
        .bind(draft.title.as_str())
        .bind(draft.content.as_deref())
        .bind(draft.status)
        .bind(draft.owner_id.value())
        .bind(draft.category_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleRow::into_article))
    }

    async fn delete(&self, article_id: ArticleId) -> NewsResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "DELETE FROM news WHERE id = $1 RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(article_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ArticleRow::into_article))
    }
}

impl PageSource<Article> for PgArticleRepository {
    type Error = NewsError;

    async fn count_matching(&self, search: &str) -> NewsResult<u64> {
        let total = sqlx::query_scalar::<_, i64>(&ARTICLE_LISTING.count_sql())
            .bind(search)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn fetch_page(&self, search: &str, offset: u64, limit: u64) -> NewsResult<Vec<Article>> {
        let rows =
            sqlx::query_as::<_, ArticleRow>(&ARTICLE_LISTING.page_sql(ARTICLE_LISTING_COLUMNS))
                .bind(search)
                .bind(to_sql_bigint(limit))
                .bind(to_sql_bigint(offset))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(ArticleRow::into_article).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: CategoryId::new(self.id),
            name: CategoryName::from_db(self.name),
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: Option<String>,
    status: i32,
    owner_id: i64,
    category_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl ArticleRow {
    fn into_article(self) -> Article {
        Article {
            article_id: ArticleId::new(self.id),
            title: ArticleTitle::from_db(self.title),
            content: self.content,
            status: self.status,
            owner_id: UserId::new(self.owner_id),
            category_id: CategoryId::new(self.category_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
