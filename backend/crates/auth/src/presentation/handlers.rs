//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::pagination::{ListQuery, Paginated};
use kernel::response::Message;

use crate::application::config::AuthConfig;
use crate::application::token_service::{AuthenticatedUser, TokenService};
use crate::application::{
    CreateUserInput, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, UpdateUserInput,
    UserAdminUseCase,
};
use crate::domain::repository::UserStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, UserView,
};
use crate::presentation::extract::JsonBody;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserStore,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: `R` itself need not be `Clone`
impl<R> Clone for AuthAppState<R>
where
    R: UserStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: UserStore,
{
    fn admin(&self) -> UserAdminUseCase<R> {
        UserAdminUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<Message<UserView>>)>
where
    R: UserStore,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            phone: req.phone,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Message::with_data(
            "Account registered successfully",
            UserView::from(output.user),
        )),
    ))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserStore,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            phone: req.phone,
            password: req.password,
        })
        .await?;

    // The refresh token stays server-side until a refresh endpoint exists
    Ok(Json(LoginResponse {
        token: output.access_token,
        user: UserView::from(output.user),
    }))
}

// ============================================================================
// User Management
// ============================================================================

/// GET /api/user
pub async fn list_all_users<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthenticatedUser,
) -> AuthResult<Json<Vec<UserView>>>
where
    R: UserStore,
{
    tracing::debug!(caller_id = caller.claims.id, "Listing all users");

    let users = state.admin().all().await?;

    Ok(Json(
        users
            .iter()
            .map(|user| UserView::from(user).with_updated_fallback())
            .collect(),
    ))
}

/// GET /api/user/list
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<ListQuery>,
) -> AuthResult<Json<Paginated<UserView>>>
where
    R: UserStore,
{
    let page = state.admin().list(&query).await?;
    Ok(Json(page.map(UserView::from)))
}

/// GET /api/user/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<i64>,
) -> AuthResult<Json<UserView>>
where
    R: UserStore,
{
    let user = state.admin().detail(UserId::new(id)).await?;
    Ok(Json(UserView::from(user)))
}

/// POST /api/user
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthenticatedUser,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<Message<UserView>>)>
where
    R: UserStore,
{
    let user = state
        .admin()
        .create(CreateUserInput {
            phone: req.phone,
            name: req.name,
            password: req.password,
        })
        .await?;

    tracing::info!(caller_id = caller.claims.id, user_id = %user.user_id, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(Message::with_data(
            "Account created successfully",
            UserView::from(user),
        )),
    ))
}

/// PUT /api/user/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AuthResult<Json<Message<UserView>>>
where
    R: UserStore,
{
    let user = state
        .admin()
        .update(
            UserId::new(id),
            UpdateUserInput {
                name: req.name,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(Message::with_data(
        format!("Updated user {}", user.name),
        UserView::from(user),
    )))
}

/// DELETE /api/user/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<i64>,
) -> AuthResult<Json<Message<()>>>
where
    R: UserStore,
{
    let user = state.admin().delete(UserId::new(id)).await?;
    Ok(Json(Message::text(format!("Deleted user {}", user.name))))
}
