//! User Administration Use Case
//!
//! Listing, detail, create, update and delete of accounts by an
//! authenticated caller.

use std::sync::Arc;

use kernel::pagination::{ListQuery, PageSource, Paginated, resolve};

use crate::application::config::AuthConfig;
use crate::application::register::insert_unique;
use crate::domain::entity::user::{User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    phone_number::PhoneNumber,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Admin create input
pub struct CreateUserInput {
    pub phone: String,
    pub name: String,
    pub password: String,
}

/// Admin update input; absent fields stay as they are
#[derive(Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub password: Option<String>,
}

pub struct UserAdminUseCase<R>
where
    R: UserRepository + PageSource<User, Error = AuthError>,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> UserAdminUseCase<R>
where
    R: UserRepository + PageSource<User, Error = AuthError>,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Paginated list searching name and phone, newest first
    pub async fn list(&self, query: &ListQuery) -> AuthResult<Paginated<User>> {
        resolve(self.repo.as_ref(), query).await
    }

    pub async fn all(&self) -> AuthResult<Vec<User>> {
        self.repo.find_all().await
    }

    pub async fn detail(&self, user_id: UserId) -> AuthResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Stricter name policy than self-registration (6 to 30 characters)
    pub async fn create(&self, input: CreateUserInput) -> AuthResult<User> {
        let phone = PhoneNumber::new(&input.phone)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let name = DisplayName::managed(&input.name)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let password = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let user = insert_unique(self.repo.as_ref(), phone, name, &password, self.config.pepper())
            .await?;

        tracing::info!(user_id = %user.user_id, "User created by administrator");

        Ok(user)
    }

    /// An empty update returns the user unchanged
    pub async fn update(&self, user_id: UserId, input: UpdateUserInput) -> AuthResult<User> {
        let name = input
            .name
            .map(DisplayName::managed)
            .transpose()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let password = match input.password {
            Some(raw) => {
                let raw = RawPassword::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;
                Some(UserPassword::from_raw(&raw, self.config.pepper())?)
            }
            None => None,
        };

        let changes = UserChanges { name, password };
        if changes.is_empty() {
            return self.detail(user_id).await;
        }

        let user = self
            .repo
            .update(user_id, &changes)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            user_id = %user.user_id,
            renamed = changes.name.is_some(),
            password_reset = changes.password.is_some(),
            "User updated"
        );

        Ok(user)
    }

    pub async fn delete(&self, user_id: UserId) -> AuthResult<User> {
        let user = self
            .repo
            .delete(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, "User deleted");

        Ok(user)
    }
}
