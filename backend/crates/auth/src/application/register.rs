//! Register Use Case
//!
//! Creates a new account from phone, name and password.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    phone_number::PhoneNumber,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub phone: String,
    pub name: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let phone = PhoneNumber::new(&input.phone)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let name =
            DisplayName::new(&input.name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let password = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let user = insert_unique(self.repo.as_ref(), phone, name, &password, self.config.pepper())
            .await?;

        tracing::info!(user_id = %user.user_id, phone = %user.phone, "User registered");

        Ok(RegisterOutput { user })
    }
}

/// Existence check, hash, insert
///
/// The pre-check is only a fast path: two concurrent registrations can both
/// pass it, and the loser then fails on the `UNIQUE(phone)` constraint, which
/// the repository reports as `DuplicatePhone` too.
pub(crate) async fn insert_unique<R>(
    repo: &R,
    phone: PhoneNumber,
    name: DisplayName,
    password: &RawPassword,
    pepper: Option<&[u8]>,
) -> AuthResult<User>
where
    R: UserRepository,
{
    if repo.find_by_phone(&phone).await?.is_some() {
        return Err(AuthError::DuplicatePhone);
    }

    let password = UserPassword::from_raw(password, pepper)?;

    repo.insert(&NewUser {
        phone,
        name,
        password,
    })
    .await
}
