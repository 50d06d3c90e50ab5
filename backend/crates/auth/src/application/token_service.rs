//! Token Service
//!
//! Holds one [`TokenKey`] per token kind and knows their lifetimes.

use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::token::{Signed, TokenKey};

use crate::application::config::AuthConfig;
use crate::domain::entity::claims::IdentityClaims;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct TokenService {
    access: TokenKey,
    refresh: TokenKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// A verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub claims: IdentityClaims,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access: TokenKey::from_secret(&config.access_token_secret),
            refresh: TokenKey::from_secret(&config.refresh_token_secret),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        }
    }

    pub fn issue_access(&self, claims: &IdentityClaims) -> AuthResult<String> {
        Ok(self.access.sign(claims, self.access_ttl)?)
    }

    pub fn issue_refresh(&self, claims: &IdentityClaims) -> AuthResult<String> {
        Ok(self.refresh.sign(claims, self.refresh_ttl)?)
    }

    /// Check signature and expiry against the access secret
    pub fn verify_access(&self, token: &str) -> AuthResult<AuthenticatedUser> {
        let signed: Signed<IdentityClaims> = self.access.verify(token)?;

        let issued_at = DateTime::from_timestamp(signed.iat, 0)
            .ok_or_else(|| AuthError::Internal("iat out of range".to_string()))?;
        let expires_at = DateTime::from_timestamp(signed.exp, 0)
            .ok_or_else(|| AuthError::Internal("exp out of range".to_string()))?;

        Ok(AuthenticatedUser {
            claims: signed.claims,
            issued_at,
            expires_at,
        })
    }
}
