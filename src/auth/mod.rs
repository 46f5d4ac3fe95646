//! Authentication Module
//! Mission: Credential verification, token issuance, and the admin gate

pub mod admin_store;
pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use admin_store::AdminStore;
pub use jwt::{TokenService, SESSION_TTL_MINUTES};
pub use middleware::require_admin;
