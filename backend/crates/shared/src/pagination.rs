//! List Query - page/size/search contract shared by every listing endpoint
//!
//! 一覧 API（ユーザー・カテゴリ・記事）はすべて同じ規約で動く:
//! - `page` は 1 始まり、既定値 1
//! - `items_per_page` は既定値 10
//! - `search` は既定値 `""`（空文字はすべてに一致）
//! - 数値として解釈できない値・0 以下の値はエラーにせず既定値に戻す
//!
//! Each entity store implements [`PageSource`] and describes its search
//! columns and ordering with a [`SearchSpec`]; [`resolve`] does the rest.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Default page when the client sends none (or garbage)
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when the client sends none (or garbage)
pub const DEFAULT_ITEMS_PER_PAGE: u64 = 10;

// ============================================================================
// Raw input
// ============================================================================

/// Untrusted list parameters, exactly as they arrive in the query string
///
/// Every field is kept as a string so that `?page=abc` falls back to the
/// default instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub items_per_page: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Normalize into a bounded [`PageRequest`]
    pub fn normalize(&self) -> PageRequest {
        PageRequest {
            page: positive_int(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            items_per_page: positive_int(self.items_per_page.as_deref())
                .unwrap_or(DEFAULT_ITEMS_PER_PAGE),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

/// Parse a positive integer, accepting `"3"`, `" 3 "` and `"3.0"`
fn positive_int(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();

    if let Ok(n) = raw.parse::<u64>() {
        return (n > 0).then_some(n);
    }

    let n = raw.parse::<f64>().ok()?;
    (n.is_finite() && n >= 1.0).then(|| n.trunc() as u64)
}

// ============================================================================
// Normalized request
// ============================================================================

/// Normalized list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number (always >= 1)
    pub page: u64,
    /// Page size (always >= 1)
    pub items_per_page: u64,
    /// Substring to match; empty matches everything
    pub search: String,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            search: String::new(),
        }
    }
}

impl PageRequest {
    /// Number of matching records to skip
    pub fn offset(&self) -> u64 {
        self.items_per_page.saturating_mul(self.page - 1)
    }

    /// Maximum number of records to return
    pub fn limit(&self) -> u64 {
        self.items_per_page
    }
}

// ============================================================================
// Output envelope
// ============================================================================

/// Pagination envelope returned by every list endpoint
///
/// Invariant: `data.len() <= items_per_page`, and `total` counts the whole
/// filtered set, not just this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub current_page: u64,
    pub items_per_page: u64,
}

impl<T> Paginated<T> {
    /// Convert every item, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            items_per_page: self.items_per_page,
        }
    }
}

// ============================================================================
// Source + resolver
// ============================================================================

/// A store that can count and page through records matching a search string
///
/// Implementations decide which fields the search is matched against and in
/// which order records come back; see [`SearchSpec`] for the SQL side.
pub trait PageSource<T>: Sync {
    type Error;

    /// Count every record matching `search`, ignoring paging
    fn count_matching(&self, search: &str) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Fetch at most `limit` matching records, skipping the first `offset`
    fn fetch_page(
        &self,
        search: &str,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<T>, Self::Error>> + Send;
}

/// Run a list query against a [`PageSource`]
///
/// A page past the end is not an error: it yields an empty `data` with the
/// real `total`.
pub async fn resolve<T, S>(source: &S, query: &ListQuery) -> Result<Paginated<T>, S::Error>
where
    S: PageSource<T>,
{
    let request = query.normalize();

    let data = source
        .fetch_page(&request.search, request.offset(), request.limit())
        .await?;
    let total = source.count_matching(&request.search).await?;

    debug_assert!(data.len() as u64 <= request.items_per_page);

    Ok(Paginated {
        data,
        total,
        current_page: request.page,
        items_per_page: request.items_per_page,
    })
}

// ============================================================================
// SQL description
// ============================================================================

/// Search columns and ordering of one listing, rendered to PostgreSQL
///
/// Bind order for the generated statements:
/// `$1` = search string, `$2` = limit, `$3` = offset.
///
/// Matching is a case-sensitive substring test (`strpos(col, $1) > 0`),
/// OR-combined across `columns`, so LIKE wildcards in user input are literal.
#[derive(Debug, Clone, Copy)]
pub struct SearchSpec {
    /// `FROM` clause, joins included
    pub from: &'static str,
    /// Text columns the search is matched against
    pub columns: &'static [&'static str],
    /// `ORDER BY` clause body
    pub order_by: &'static str,
}

impl SearchSpec {
    /// `WHERE` body: OR of substring tests
    ///
    /// With no columns every row matches; `$1` is still referenced so the
    /// bind count stays the same.
    pub fn filter(&self) -> String {
        if self.columns.is_empty() {
            return "($1::text = $1::text)".to_string();
        }

        let tests: Vec<String> = self
            .columns
            .iter()
            .map(|column| format!("strpos({column}, $1) > 0"))
            .collect();

        format!("({})", tests.join(" OR "))
    }

    /// Statement counting all matching rows
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {} WHERE {}", self.from, self.filter())
    }

    /// Statement fetching one page of matching rows
    pub fn page_sql(&self, select: &str) -> String {
        format!(
            "SELECT {select} FROM {} WHERE {} ORDER BY {} LIMIT $2 OFFSET $3",
            self.from,
            self.filter(),
            self.order_by
        )
    }
}

/// Convert a `u64` paging value to a SQL `BIGINT`, saturating
pub fn to_sql_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn query(page: Option<&str>, items_per_page: Option<&str>, search: Option<&str>) -> ListQuery {
        ListQuery {
            page: page.map(str::to_string),
            items_per_page: items_per_page.map(str::to_string),
            search: search.map(str::to_string),
        }
    }

    /// In-memory source: names matched by substring, insertion order
    struct Names(Vec<&'static str>);

    impl PageSource<String> for Names {
        type Error = Infallible;

        async fn count_matching(&self, search: &str) -> Result<u64, Infallible> {
            Ok(self.0.iter().filter(|n| n.contains(search)).count() as u64)
        }

        async fn fetch_page(
            &self,
            search: &str,
            offset: u64,
            limit: u64,
        ) -> Result<Vec<String>, Infallible> {
            Ok(self
                .0
                .iter()
                .filter(|n| n.contains(search))
                .skip(offset as usize)
                .take(limit as usize)
                .map(|n| n.to_string())
                .collect())
        }
    }

    fn six() -> Names {
        Names(vec!["an", "binh", "chau", "dung", "giang", "hoa"])
    }

    #[test]
    fn test_defaults_when_absent() {
        let request = ListQuery::default().normalize();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page, 1);
        assert_eq!(request.items_per_page, 10);
        assert_eq!(request.search, "");
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let request = query(Some("abc"), Some("-5"), None).normalize();
        assert_eq!(request.page, 1);
        assert_eq!(request.items_per_page, 10);

        let request = query(Some("0"), Some(""), None).normalize();
        assert_eq!(request.page, 1);
        assert_eq!(request.items_per_page, 10);

        let request = query(Some("NaN"), Some("inf"), None).normalize();
        assert_eq!(request.page, 1);
        assert_eq!(request.items_per_page, 10);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let request = query(Some(" 3 "), Some("2.0"), Some("ng")).normalize();
        assert_eq!(request.page, 3);
        assert_eq!(request.items_per_page, 2);
        assert_eq!(request.search, "ng");
        assert_eq!(request.offset(), 4);
    }

    #[test]
    fn test_offset_saturates() {
        let request = PageRequest {
            page: u64::MAX,
            items_per_page: u64::MAX,
            search: String::new(),
        };
        assert_eq!(request.offset(), u64::MAX);
        assert_eq!(to_sql_bigint(request.offset()), i64::MAX);
    }

    #[tokio::test]
    async fn test_resolve_empty_query_equals_explicit_defaults() {
        let source = six();
        let implicit = resolve(&source, &ListQuery::default()).await.unwrap();
        let explicit = resolve(&source, &query(Some("1"), Some("10"), Some("")))
            .await
            .unwrap();
        assert_eq!(implicit, explicit);
        assert_eq!(implicit.data.len(), 6);
    }

    #[tokio::test]
    async fn test_resolve_second_page() {
        let page = resolve(&six(), &query(Some("2"), Some("4"), None))
            .await
            .unwrap();
        assert_eq!(page.data, vec!["giang".to_string(), "hoa".to_string()]);
        assert_eq!(page.total, 6);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items_per_page, 4);
    }

    #[tokio::test]
    async fn test_resolve_past_the_end() {
        let page = resolve(&six(), &query(Some("100"), Some("10"), None))
            .await
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 6);
        assert_eq!(page.current_page, 100);
    }

    #[tokio::test]
    async fn test_resolve_total_follows_filter() {
        let page = resolve(&six(), &query(None, Some("1"), Some("n")))
            .await
            .unwrap();
        // an, binh, dung, giang
        assert_eq!(page.total, 4);
        assert_eq!(page.data, vec!["an".to_string()]);
    }

    #[test]
    fn test_paginated_map_keeps_metadata() {
        let page = Paginated {
            data: vec![1, 2],
            total: 7,
            current_page: 3,
            items_per_page: 2,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.data, vec![10, 20]);
        assert_eq!(mapped.total, 7);
        assert_eq!(mapped.current_page, 3);
    }

    #[test]
    fn test_paginated_wire_format() {
        let page = Paginated {
            data: vec!["x"],
            total: 1,
            current_page: 1,
            items_per_page: 10,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": ["x"],
                "total": 1,
                "current_page": 1,
                "items_per_page": 10
            })
        );
    }

    #[test]
    fn test_search_spec_sql() {
        const SPEC: SearchSpec = SearchSpec {
            from: "users",
            columns: &["name", "phone"],
            order_by: "created_at DESC",
        };

        assert_eq!(
            SPEC.count_sql(),
            "SELECT COUNT(*) FROM users WHERE (strpos(name, $1) > 0 OR strpos(phone, $1) > 0)"
        );
        assert_eq!(
            SPEC.page_sql("id, name"),
            "SELECT id, name FROM users WHERE (strpos(name, $1) > 0 OR strpos(phone, $1) > 0) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn test_search_spec_without_columns() {
        let spec = SearchSpec {
            from: "categories",
            columns: &[],
            order_by: "id DESC",
        };
        assert_eq!(spec.filter(), "($1::text = $1::text)");
    }
}
