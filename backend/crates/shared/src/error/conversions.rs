//! Error conversions
//!
//! - Classification of `sqlx` failures into the few cases domain crates care about
//! - Axum response rendering for [`AppError`]

#[cfg(feature = "sqlx")]
pub use db::{DbFailure, classify_db_error};

// ============================================================================
// SQLx classification (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
mod db {
    /// Coarse classification of a database error
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DbFailure {
        /// 23505 unique_violation
        UniqueViolation,
        /// 23503 foreign_key_violation
        ForeignKeyViolation,
        /// `fetch_one` found no row
        RowNotFound,
        /// Pool exhausted, connection refused, server shutting down
        Unavailable,
        /// Anything else
        Other,
    }

    /// Classify a `sqlx::Error`
    ///
    /// PostgreSQL error codes:
    /// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
    pub fn classify_db_error(err: &sqlx::Error) -> DbFailure {
        match err {
            sqlx::Error::RowNotFound => DbFailure::RowNotFound,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DbFailure::Unavailable
            }
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => DbFailure::UniqueViolation,
                Some("23503") => DbFailure::ForeignKeyViolation,
                // Class 53 — Insufficient Resources, Class 57 — Operator Intervention
                Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P02" | "57P03") => {
                    DbFailure::Unavailable
                }
                _ => DbFailure::Other,
            },
            _ => DbFailure::Other,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_row_not_found() {
            assert_eq!(
                classify_db_error(&sqlx::Error::RowNotFound),
                DbFailure::RowNotFound
            );
        }

        #[test]
        fn test_pool_timeout_is_unavailable() {
            assert_eq!(
                classify_db_error(&sqlx::Error::PoolTimedOut),
                DbFailure::Unavailable
            );
        }

        #[test]
        fn test_other_errors() {
            let err = sqlx::Error::Protocol("unexpected message".to_string());
            assert_eq!(classify_db_error(&err), DbFailure::Other);
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
