//! Access Guard
//!
//! Middleware for requiring a bearer token on protected routes, plus the
//! extractor handlers use to read the verified identity.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::AuthorizeUseCase;
use crate::application::token_service::{AuthenticatedUser, TokenService};
use crate::error::AuthError;

/// Middleware state
///
/// Only needs the token keys, so routers of other crates can carry it.
#[derive(Debug, Clone)]
pub struct AccessGuardState {
    pub tokens: Arc<TokenService>,
}

impl AccessGuardState {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Middleware that requires a valid access token
///
/// On success the decoded identity is stored in the request extensions as
/// [`AuthenticatedUser`].
pub async fn require_access_token(
    State(guard): State<AccessGuardState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedToken)?),
        None => None,
    };

    let user = AuthorizeUseCase::new(guard.tokens.clone()).execute(header)?;

    tracing::debug!(user_id = user.claims.id, "Access token accepted");

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}
