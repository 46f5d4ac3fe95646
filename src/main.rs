//! Portfolio Backend
//! Mission: Auth-gated CMS API for a personal portfolio site

use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_backend::{
    app::{build_router, AppState},
    auth::{AdminStore, TokenService},
    config::Config,
    content::ContentStore,
    notifications::NotificationStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    info!("🚀 Starting portfolio backend");

    let config = Config::from_env();

    let admins = Arc::new(AdminStore::new(&config.auth_db_path)?);
    admins.seed_default(&config.seed_admin_username, &config.seed_admin_password)?;

    let tokens = Arc::new(TokenService::new(config.jwt_secret.clone()));
    let notifications = Arc::new(NotificationStore::new(&config.notifications_db_path)?);
    let content = Arc::new(ContentStore::new(&config.content_db_path)?);

    let state = AppState {
        admins,
        tokens,
        notifications,
        content,
    };

    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
