//! Process Configuration
//! Mission: Read the environment once at startup, pass explicit config down
//!
//! Nothing reads env vars after startup. The JWT signing secret in
//! particular lives here so the token service can be constructed with a
//! per-test secret instead of ambient global state.

use std::env;

/// Process-wide configuration, loaded once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub auth_db_path: String,
    pub content_db_path: String,
    pub notifications_db_path: String,
    /// Signing secret for access tokens. Rotating it invalidates every
    /// outstanding token, which is acceptable for 10-minute sessions.
    pub jwt_secret: String,
    pub seed_admin_username: String,
    pub seed_admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            auth_db_path: env::var("AUTH_DB_PATH")
                .unwrap_or_else(|_| "portfolio_auth.db".to_string()),
            content_db_path: env::var("CONTENT_DB_PATH")
                .unwrap_or_else(|_| "portfolio_content.db".to_string()),
            notifications_db_path: env::var("NOTIFICATIONS_DB_PATH")
                .unwrap_or_else(|_| "portfolio_notifications.db".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                "dev-secret-change-in-production-minimum-32-characters".to_string()
            }),
            seed_admin_username: env::var("SEED_ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            seed_admin_password: env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}
