//! User Entity
//!
//! A registered identity. The password hash lives on the entity but never
//! leaves the crate through a DTO.

use chrono::{DateTime, Utc};

use crate::domain::entity::claims::IdentityClaims;
use crate::domain::value_object::{
    display_name::DisplayName, phone_number::PhoneNumber, user_id::UserId,
    user_password::UserPassword,
};

/// User entity as stored
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique login handle
    pub phone: PhoneNumber,
    pub name: DisplayName,
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
    /// `None` until the first update
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Claim set embedded in issued tokens
    pub fn claims(&self) -> IdentityClaims {
        IdentityClaims {
            id: self.user_id.value(),
            name: self.name.as_str().to_string(),
            phone: self.phone.as_str().to_string(),
        }
    }
}

/// A user that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub phone: PhoneNumber,
    pub name: DisplayName,
    pub password: UserPassword,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<DisplayName>,
    pub password: Option<UserPassword>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password.is_none()
    }
}
