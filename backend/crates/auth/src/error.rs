//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::conversions::classify_db_error;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Detail shown for storage failures; the cause is only logged
pub const STORAGE_FAILURE_MESSAGE: &str = "Something went wrong! Please try again later.";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Phone number is already registered
    #[error("Phone number is already registered")]
    DuplicatePhone,

    /// Unknown phone or wrong password; the two are never distinguished
    #[error("Phone number or password is incorrect")]
    InvalidCredentials,

    /// No `Authorization` header
    #[error("Token not found")]
    Unauthenticated,

    /// `Authorization` header present but not `Bearer <token>`
    #[error("Invalid token")]
    MalformedToken,

    /// Signature, expiry or claim shape check failed
    #[error("Token does not exist or is invalid")]
    InvalidToken(#[source] TokenError),

    #[error("User not found")]
    UserNotFound,

    /// Input rejected by a value object
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicatePhone | AuthError::Validation(_) | AuthError::Storage(_) => {
                ErrorKind::BadRequest
            }
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::MalformedToken
            | AuthError::InvalidToken(_) => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Storage(_) => AppError::bad_request(STORAGE_FAILURE_MESSAGE),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            AuthError::Unauthenticated | AuthError::MalformedToken | AuthError::InvalidToken(_) => {
                AppError::unauthorized(self.to_string())
                    .with_action("Send \"Authorization: Bearer <token>\" from a fresh login")
            }
            AuthError::UserNotFound => AppError::not_found(self.to_string()),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, failure = ?classify_db_error(e), "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Unauthenticated => {
                tracing::warn!("Request without bearer token");
            }
            AuthError::MalformedToken => {
                tracing::warn!("Malformed Authorization header");
            }
            AuthError::InvalidToken(e) => {
                tracing::warn!(reason = %e, "Bearer token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => AuthError::Internal(msg),
            other => AuthError::InvalidToken(other),
        }
    }
}
