//! Audit Notifications Module
//! Mission: Mirror every admin action and login attempt into a feed

pub mod api;
pub mod models;
pub mod store;

pub use models::{Notification, NotificationType};
pub use store::NotificationStore;

use tracing::warn;

/// Best-effort audit write.
///
/// The business operation already succeeded or failed on its own; a
/// broken audit insert must not change that outcome, so failures are
/// logged and swallowed here.
pub fn notify(store: &NotificationStore, kind: NotificationType, message: String) {
    if let Err(e) = store.record(&message, kind) {
        warn!("Failed to record notification ({}): {}", kind.as_str(), e);
    }
}
