//! Authentication Endpoints
//! Mission: Login, token verification, and admin identity lifecycle

use crate::app::AppState;
use crate::auth::models::{
    AdminIdentity, AdminProfile, AdminRole, CreateAdminRequest, CurrentAdmin, LoginRequest,
    TokenResponse,
};
use crate::auth::password;
use crate::error::ApiError;
use crate::notifications::{notify, NotificationType};
use crate::response::{CreatedResponse, DataResponse, MessageResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use tokio::task;
use tracing::{info, warn};

/// POST /api/admin/login
///
/// Unknown username and wrong password take the same rejection path:
/// one `error` notification, one uniform 401. Success issues a
/// 10-minute token and records one `security` notification.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!("🔐 Login attempt: {}", payload.username);

    let identity = state.admins.get(&payload.username)?;

    // bcrypt is CPU-bound; keep it off the async workers.
    let valid = match &identity {
        Some(admin) => {
            let digest = admin.password_hash.clone();
            let plaintext = payload.password.clone();
            task::spawn_blocking(move || password::verify_password(&plaintext, &digest))
                .await
                .map_err(|_| ApiError::Internal)?
        }
        None => false,
    };

    if !valid {
        warn!("❌ Failed login attempt: {}", payload.username);
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Login Attempt: {} failed to log in",
                payload.username
            ),
        );
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.tokens.issue(&payload.username)?;

    info!("✅ Login successful: {}", payload.username);
    notify(
        &state.notifications,
        NotificationType::Security,
        format!("SUCCESS Login: Admin {} logged in", payload.username),
    );

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /api/admin/verify - cheap token liveness check.
pub async fn verify(Extension(admin): Extension<CurrentAdmin>) -> Json<Value> {
    Json(json!({
        "success": true,
        "admin": { "username": admin.username },
    }))
}

/// GET /api/admin/me
pub async fn me(Extension(admin): Extension<CurrentAdmin>) -> Json<AdminProfile> {
    Json(AdminProfile::from_current(&admin))
}

/// POST /api/admin/users
pub async fn create_admin(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if state.admins.get(&payload.username)?.is_some() {
        notify(
            &state.notifications,
            NotificationType::Warning,
            format!(
                "WARNING Admin Creation: hey {}, Admin {} already exists",
                admin.username, payload.username
            ),
        );
        return Err(ApiError::InvalidOperation(
            "Username already registered".to_string(),
        ));
    }

    let plaintext = payload.password.clone();
    let password_hash = task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|_| ApiError::Internal)??;

    let created = state.admins.create(
        &payload.username,
        &password_hash,
        &payload.name,
        &payload.profile_image,
        AdminRole::Admin,
    )?;

    notify(
        &state.notifications,
        NotificationType::Success,
        format!(
            "SUCCESS Admin Creation: New Admin {} created by {}",
            created.username, admin.username
        ),
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Admin created successfully",
            created.username,
        )),
    ))
}

/// GET /api/admin/users
pub async fn list_admins(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<AdminIdentity>>>, ApiError> {
    let admins = state.admins.list()?;
    Ok(Json(DataResponse::new(admins)))
}

/// DELETE /api/admin/users/:username
///
/// Superadmin-gated. Nobody may delete their own account, superadmins
/// included.
pub async fn delete_admin(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if admin.role != AdminRole::Superadmin {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Admin Deletion: Admin {} attempted to delete admin {} || Permission Denied",
                admin.username, username
            ),
        );
        return Err(ApiError::Forbidden);
    }

    if username == admin.username {
        notify(
            &state.notifications,
            NotificationType::Warning,
            format!(
                "WARNING Admin Deletion: Hey {}, you cannot delete your own account",
                admin.username
            ),
        );
        return Err(ApiError::InvalidOperation(
            "You cannot delete your own account.".to_string(),
        ));
    }

    if !state.admins.delete(&username)? {
        notify(
            &state.notifications,
            NotificationType::Error,
            format!(
                "ERROR Admin Deletion: {} Failed to delete admin {} || Admin Not Found",
                admin.username, username
            ),
        );
        return Err(ApiError::NotFound("Admin".to_string()));
    }

    notify(
        &state.notifications,
        NotificationType::Info,
        format!(
            "SUCCESS Admin Deletion: Admin {} deleted by {}",
            username, admin.username
        ),
    );

    Ok(Json(MessageResponse::new("Admin deleted successfully")))
}

/// POST /api/admin/logout-notify
///
/// Tokens are stateless and simply expire; this only records the event.
pub async fn logout_notify(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Json<MessageResponse> {
    notify(
        &state.notifications,
        NotificationType::Security,
        format!("Admin '{}' logged out.", admin.username),
    );

    Json(MessageResponse::new("Logout notification created."))
}
