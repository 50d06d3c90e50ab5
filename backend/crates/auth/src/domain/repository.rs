//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Paginated listing goes through `kernel::pagination::PageSource<User>`.

use kernel::pagination::PageSource;

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by phone number
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Insert a new user, returning it with its assigned id
    ///
    /// A phone that is already taken fails with `AuthError::DuplicatePhone`.
    async fn insert(&self, user: &NewUser) -> AuthResult<User>;

    /// Every user, newest first
    async fn find_all(&self) -> AuthResult<Vec<User>>;

    /// Apply changes; `None` when no such user
    async fn update(&self, user_id: UserId, changes: &UserChanges) -> AuthResult<Option<User>>;

    /// Delete and return the removed user; `None` when no such user
    async fn delete(&self, user_id: UserId) -> AuthResult<Option<User>>;
}

/// Everything the HTTP layer needs from a user store
pub trait UserStore:
    UserRepository + PageSource<User, Error = AuthError> + Send + Sync + 'static
{
}

impl<T> UserStore for T where
    T: UserRepository + PageSource<User, Error = AuthError> + Send + Sync + 'static
{
}
