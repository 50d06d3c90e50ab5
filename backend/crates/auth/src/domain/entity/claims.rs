//! Identity Claims
//!
//! What a bearer token says about its holder. Deliberately small: no
//! password, no roles.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_id::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

impl IdentityClaims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.id)
    }
}
