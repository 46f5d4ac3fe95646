//! Authorization Gate
//! Mission: Protect admin endpoints with bearer token validation

use crate::app::AppState;
use crate::auth::models::CurrentAdmin;
use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Middleware guarding every `/api/admin` route except login.
///
/// Token signature/expiry failures, a missing header, and a subject that
/// no longer exists all yield the same 401: callers learn nothing about
/// which check failed.
///
/// The subject is re-resolved from the credential store on every request
/// rather than trusted from the token, so deleting an admin revokes
/// access immediately even though tokens themselves are stateless.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthenticated)?;

    let claims = state.tokens.validate(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::Unauthenticated
    })?;

    let identity = state
        .admins
        .get(&claims.sub)?
        .ok_or(ApiError::Unauthenticated)?;

    req.extensions_mut()
        .insert(CurrentAdmin::from_identity(&identity));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::AdminRole;
    use axum::{body::Body, http::Request as HttpRequest};

    #[test]
    fn test_current_admin_extension_roundtrip() {
        let mut req = HttpRequest::new(Body::empty());
        assert!(req.extensions().get::<CurrentAdmin>().is_none());

        req.extensions_mut().insert(CurrentAdmin {
            username: "admin".to_string(),
            name: "Admin".to_string(),
            profile_image: String::new(),
            role: AdminRole::Superadmin,
        });

        let current = req.extensions().get::<CurrentAdmin>().unwrap();
        assert_eq!(current.username, "admin");
        assert_eq!(current.role, AdminRole::Superadmin);
    }
}
