//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{AccessGuardState, AuthConfig, PgAuthRepository, TokenService, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use news::{PgArticleRepository, PgCategoryRepository, news_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,news=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = Arc::new(load_auth_config()?);
    let tokens = Arc::new(TokenService::new(&auth_config));
    let guard = AccessGuardState::new(tokens.clone());

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = Router::new()
        .merge(auth_router(
            PgAuthRepository::new(pool.clone()),
            tokens,
            auth_config,
        ))
        .merge(news_router(
            PgCategoryRepository::new(pool.clone()),
            PgArticleRepository::new(pool),
            guard,
        ));

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = match env::var("PORT") {
        Ok(raw) => raw.parse().context("PORT must be a port number")?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Token secrets are mandatory in release builds
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let secrets = env::var("ACCESS_TOKEN_KEY")
        .ok()
        .zip(env::var("REFRESH_TOKEN_KEY").ok());

    let config = match secrets {
        Some((access, refresh)) => AuthConfig::new(access, refresh),
        None if cfg!(debug_assertions) => {
            tracing::warn!("Token keys not set, using random development secrets");
            AuthConfig::development()
        }
        None => anyhow::bail!("ACCESS_TOKEN_KEY and REFRESH_TOKEN_KEY must be set in production"),
    };

    Ok(match env::var("PASSWORD_PEPPER") {
        Ok(pepper) if !pepper.is_empty() => config.with_pepper(pepper),
        _ => config,
    })
}
