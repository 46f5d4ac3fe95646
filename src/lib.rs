//! Portfolio Backend
//! Mission: Auth-gated CMS API for a personal portfolio site

pub mod app;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod notifications;
pub mod response;
