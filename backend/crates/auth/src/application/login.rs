//! Login Use Case
//!
//! Verifies phone + password and issues an access/refresh token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub phone: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// 30-minute bearer token
    pub access_token: String,
    /// 7-day token; not redeemable anywhere yet
    pub refresh_token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    /// Every failure up to token issuance is `InvalidCredentials`, so a caller
    /// cannot tell an unknown phone from a wrong password.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let phone = PhoneNumber::new(&input.phone).map_err(|_| AuthError::InvalidCredentials)?;
        let password = RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(user) = self.repo.find_by_phone(&phone).await? else {
            // Same Argon2 cost as a wrong password
            UserPassword::verify_absent(&password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = user.claims();
        let access_token = self.tokens.issue_access(&claims)?;
        let refresh_token = self.tokens.issue_refresh(&claims)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput {
            access_token,
            refresh_token,
            user,
        })
    }
}
