//! API DTOs (Data Transfer Objects)
//!
//! No DTO here carries a password hash; every outward identity is a
//! [`UserView`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// User View
// ============================================================================

/// User as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub phone: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.value(),
            phone: user.phone.as_str().to_string(),
            name: user.name.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl UserView {
    /// Never-updated users report their creation time as `updatedAt`
    pub fn with_updated_fallback(mut self) -> Self {
        self.updated_at = self.updated_at.or(Some(self.created_at));
        self
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub phone: String,
    pub name: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Access token, sent back as `Authorization: Bearer <token>`
    pub token: String,
    pub user: UserView,
}

// ============================================================================
// User Management
// ============================================================================

/// Admin create request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub phone: String,
    pub name: String,
    pub password: String,
}

/// Admin update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}
