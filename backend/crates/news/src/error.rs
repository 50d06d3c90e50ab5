//! News Error Types

use auth::error::STORAGE_FAILURE_MESSAGE;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_db_error;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type NewsResult<T> = Result<T, NewsError>;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Category not found")]
    CategoryNotFound,

    #[error("Article not found")]
    ArticleNotFound,

    /// Input rejected by a value object
    #[error("{0}")]
    Validation(String),

    /// Database error, including dangling owner/category references
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl NewsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NewsError::CategoryNotFound | NewsError::ArticleNotFound => ErrorKind::NotFound,
            NewsError::Validation(_) | NewsError::Storage(_) => ErrorKind::BadRequest,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            NewsError::Storage(_) => AppError::bad_request(STORAGE_FAILURE_MESSAGE),
            NewsError::CategoryNotFound | NewsError::ArticleNotFound => {
                AppError::not_found(self.to_string())
            }
            NewsError::Validation(msg) => AppError::bad_request(msg.clone()),
        }
    }

    fn log(&self) {
        match self {
            NewsError::Storage(e) => {
                tracing::error!(error = %e, failure = ?classify_db_error(e), "News database error");
            }
            _ => {
                tracing::debug!(error = %self, "News error");
            }
        }
    }
}

impl IntoResponse for NewsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for NewsError {
    fn from(rejection: JsonRejection) -> Self {
        NewsError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(NewsError::CategoryNotFound.to_app_error().status_code(), 404);
        assert_eq!(NewsError::ArticleNotFound.to_app_error().status_code(), 404);
        assert_eq!(
            NewsError::Validation("x".into()).to_app_error().status_code(),
            400
        );
    }

    #[test]
    fn test_storage_failure_is_generic_bad_request() {
        let app = NewsError::Storage(sqlx::Error::PoolClosed).to_app_error();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.message(), STORAGE_FAILURE_MESSAGE);
    }
}
