//! Content Module
//! Mission: Portfolio section documents and their public/admin endpoints

pub mod api;
pub mod models;
pub mod store;

pub use store::ContentStore;
