//! Authorize Use Case
//!
//! Turns an `Authorization` header value into a verified identity.

use std::sync::Arc;

use crate::application::token_service::{AuthenticatedUser, TokenService};
use crate::error::{AuthError, AuthResult};

const BEARER: &str = "Bearer";

pub struct AuthorizeUseCase {
    tokens: Arc<TokenService>,
}

impl AuthorizeUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// `header` is the raw `Authorization` value, `None` when absent
    ///
    /// - absent: `Unauthenticated`
    /// - not exactly `Bearer <token>`: `MalformedToken`
    /// - bad signature, expired, wrong claims: `InvalidToken`
    pub fn execute(&self, header: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let header = header.ok_or(AuthError::Unauthenticated)?;
        let token = bearer_token(header).ok_or(AuthError::MalformedToken)?;

        self.tokens.verify_access(token)
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if scheme != BEARER || token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token)
}
