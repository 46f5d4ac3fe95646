//! API Error Taxonomy
//! Mission: Map every failure to a stable status code and a safe message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Failures surfaced to API callers.
///
/// Internal detail never leaks: unexpected store/hashing errors collapse
/// into `Internal` with a generic message, logged server-side.
#[derive(Debug)]
pub enum ApiError {
    /// Login rejected. Identical message for unknown username and wrong
    /// password so callers cannot enumerate accounts.
    InvalidCredentials,
    /// Missing, malformed, or expired bearer token, or a token whose
    /// subject no longer exists. Deliberately uniform.
    Unauthenticated,
    /// Valid identity lacking the required role.
    Forbidden,
    /// Business-rule violation: empty patch, self-deletion, duplicate
    /// username, malformed input.
    InvalidOperation(String),
    /// Operation target does not exist.
    NotFound(String),
    /// Unexpected failure in a store or in hashing.
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::InvalidCredentials => "Incorrect username or password".to_string(),
            ApiError::Unauthenticated => "Could not validate credentials".to_string(),
            ApiError::Forbidden => {
                "You do not have permission to perform this action.".to_string()
            }
            ApiError::InvalidOperation(msg) => msg.clone(),
            ApiError::NotFound(what) => format!("{} not found", what),
            ApiError::Internal => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "message": self.message(),
        });
        (self.status(), Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!("Unhandled internal error: {:#}", err);
        ApiError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::InvalidOperation("No update data provided".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Project".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err: ApiError = anyhow::anyhow!("sqlite disk I/O error at offset 42").into();
        assert!(matches!(err, ApiError::Internal));
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_login_failure_message_is_uniform() {
        // Unknown user and wrong password must be indistinguishable.
        assert_eq!(
            ApiError::InvalidCredentials.message(),
            "Incorrect username or password"
        );
    }
}
