//! Signed Bearer Tokens
//!
//! HS256 JWTs carrying an arbitrary claim set plus `iat`/`exp`.
//! A [`TokenKey`] is built once from a secret at startup and shared;
//! each token kind (access, refresh) gets its own key.
//!
//! ## Usage
//! ```rust
//! use platform::token::TokenKey;
//! use std::time::Duration;
//!
//! #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
//! struct Claims { id: i64 }
//!
//! let key = TokenKey::from_secret(b"access-secret");
//! let token = key.sign(&Claims { id: 1 }, Duration::from_secs(60)).unwrap();
//! let signed = key.verify::<Claims>(&token).unwrap();
//! assert_eq!(signed.claims, Claims { id: 1 });
//! ```

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Token verification/signing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

// ============================================================================
// Claims envelope
// ============================================================================

/// Claim set as carried on the wire: caller claims flattened next to `iat`/`exp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signed<C> {
    #[serde(flatten)]
    pub claims: C,
    /// Issued-at (UTC Unix timestamp)
    pub iat: i64,
    /// Expiration (UTC Unix timestamp)
    pub exp: i64,
}

// ============================================================================
// Token Key
// ============================================================================

/// HMAC-SHA256 key able to both sign and verify
#[derive(Clone)]
pub struct TokenKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKey {
    /// Build a key from a shared secret
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No clock tolerance: a token is dead the second it expires
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign `claims`, valid for `ttl` from now
    pub fn sign<C: Serialize>(&self, claims: &C, ttl: Duration) -> Result<String, TokenError> {
        self.sign_at(claims, Utc::now(), ttl)
    }

    /// Sign `claims` as if issued at `issued_at`
    pub fn sign_at<C: Serialize>(
        &self,
        claims: &C,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let iat = issued_at.timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);

        let envelope = Signed {
            claims,
            iat,
            exp: iat.saturating_add(ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &envelope, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<Signed<C>, TokenError> {
        let data = decode::<Signed<C>>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKey")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct TestClaims {
        id: i64,
        name: String,
    }

    fn claims() -> TestClaims {
        TestClaims {
            id: 42,
            name: "Lan".to_string(),
        }
    }

    const TTL: Duration = Duration::from_secs(30 * 60);

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let key = TokenKey::from_secret(b"test-secret-that-is-long-enough");
        let token = key.sign(&claims(), TTL).unwrap();

        let signed = key.verify::<TestClaims>(&token).unwrap();
        assert_eq!(signed.claims, claims());
        assert_eq!(signed.exp - signed.iat, 30 * 60);
    }

    #[test]
    fn test_claims_are_flat_on_the_wire() {
        let key = TokenKey::from_secret(b"secret");
        let token = key.sign(&claims(), TTL).unwrap();

        let signed = key.verify::<serde_json::Value>(&token).unwrap();
        assert_eq!(signed.claims["id"], 42);
        assert_eq!(signed.claims["name"], "Lan");
    }

    #[test]
    fn test_expired_token_fails() {
        let key = TokenKey::from_secret(b"secret");
        let issued = Utc::now() - chrono::Duration::hours(2);
        let token = key.sign_at(&claims(), issued, TTL).unwrap();

        assert_eq!(
            key.verify::<TestClaims>(&token).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_different_secrets_fail() {
        let access = TokenKey::from_secret(b"secret-alpha");
        let refresh = TokenKey::from_secret(b"secret-bravo");

        let token = refresh.sign(&claims(), TTL).unwrap();
        assert_eq!(
            access.verify::<TestClaims>(&token).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let key = TokenKey::from_secret(b"secret");
        assert_eq!(
            key.verify::<TestClaims>("not.a.jwt").unwrap_err(),
            TokenError::Malformed
        );
        assert_eq!(
            key.verify::<TestClaims>("").unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_wrong_claim_shape_is_malformed() {
        #[derive(Serialize)]
        struct Other {
            foo: bool,
        }

        let key = TokenKey::from_secret(b"secret");
        let token = key.sign(&Other { foo: true }, TTL).unwrap();
        assert_eq!(
            key.verify::<TestClaims>(&token).unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_debug_redaction() {
        let key = TokenKey::from_secret(b"super-secret");
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("super-secret"));
    }
}
