//! Notification Feed Endpoints
//! Mission: Let admins read and prune the audit feed

use crate::app::AppState;
use crate::auth::models::CurrentAdmin;
use crate::error::ApiError;
use crate::notifications::models::{Notification, NotificationType};
use crate::response::MessageResponse;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NotificationFeed {
    pub success: bool,
    pub data: Vec<Notification>,
    #[serde(rename = "unreadCount")]
    pub unread_count: i64,
}

/// GET /api/admin/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<NotificationFeed>, ApiError> {
    let data = state.notifications.list()?;
    let unread_count = state.notifications.count_unread()?;

    Ok(Json(NotificationFeed {
        success: true,
        data,
        unread_count,
    }))
}

/// PUT /api/admin/notifications/:id/read
pub async fn mark_one_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.notifications.mark_read(&id)? {
        return Err(ApiError::NotFound("Notification".to_string()));
    }
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// POST /api/admin/notifications/mark-read
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notifications.mark_all_read()?;

    // Recorded pre-read so the bulk action doesn't immediately undo itself.
    if let Err(e) = state.notifications.record_with_read(
        &format!(
            "SUCCESS UPDATE Notifications: Admin {} marked all notifications as read.",
            admin.username
        ),
        NotificationType::Info,
        true,
    ) {
        tracing::warn!("Failed to record notification: {}", e);
    }

    Ok(Json(MessageResponse::new("Notifications marked as read")))
}

/// DELETE /api/admin/notifications
pub async fn clear_all(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.notifications.clear_all()?;

    crate::notifications::notify(
        &state.notifications,
        NotificationType::Info,
        format!(
            "SUCCESS DELETE Notifications: Admin {} cleared all notifications.",
            admin.username
        ),
    );

    Ok(Json(MessageResponse::new("All notifications cleared")))
}
