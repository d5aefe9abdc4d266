//! API Server Entry Point
//!
//! Loads configuration, connects to PostgreSQL, runs migrations and serves
//! the composed auth + Q&A router. Uses `anyhow` for startup errors only;
//! request-level errors are the crates' own types.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::application::SignUpUseCase;
use auth::domain::repository::SessionRepository;
use auth::{AuthConfig, PgAuthRepository, auth_router, install_request_guards};
use platform::config::{env_flag, env_or, secret_from_env};
use qa::{PgQaRepository, qa_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,qa=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(auth_config_from_env()?);

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_repo = Arc::new(PgAuthRepository::new(pool.clone()));

    // Errors here should not prevent server startup
    if let Err(e) = auth_repo.cleanup_expired().await {
        tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
    }

    let demo = SignUpUseCase::new(auth_repo.clone(), config.clone())
        .ensure_demo_account()
        .await?;
    tracing::info!(user_id = %demo.user_id, "Demo account ready");

    let routes = auth_router(PgAuthRepository::new(pool.clone()), config.clone())
        .merge(qa_router(PgQaRepository::new(pool), config.clone()));
    let app = install_request_guards(routes, auth_repo, config).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = env_or("BIND_ADDR", "0.0.0.0:31113")
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the auth configuration from the environment.
///
/// Debug builds fall back to a random secret and insecure cookies; release
/// builds refuse to start without `SESSION_SECRET`.
fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let base = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    let session_secret = match secret_from_env("SESSION_SECRET")? {
        Some(secret) => secret,
        None if cfg!(debug_assertions) => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            base.session_secret
        }
        None => anyhow::bail!("SESSION_SECRET must be set in production"),
    };

    Ok(AuthConfig {
        session_secret,
        cookie_secure: env_flag("COOKIE_SECURE", base.cookie_secure)?,
        password_pepper: env::var("PASSWORD_PEPPER").ok().map(String::into_bytes),
        demo_email: env_or("DEMO_EMAIL", &base.demo_email),
        ..base
    })
}
