//! Auth Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::application::token_service::TokenService;
use crate::domain::repository::UserStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AccessGuardState, require_access_token};

/// Create the Auth router for any user store
///
/// - `/auth/register`, `/auth/login`: open
/// - `/user/...`: behind the access guard
pub fn auth_router<R>(repo: R, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Router
where
    R: UserStore,
{
    let guard = AccessGuardState::new(tokens.clone());

    let state = AuthAppState {
        repo: Arc::new(repo),
        tokens,
        config,
    };

    let auth = Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>));

    let user = Router::new()
        .route(
            "/",
            get(handlers::list_all_users::<R>).post(handlers::create_user::<R>),
        )
        .route("/list", get(handlers::list_users::<R>))
        .route(
            "/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_access_token));

    Router::new()
        .nest("/auth", auth)
        .nest("/user", user)
        .with_state(state)
}
