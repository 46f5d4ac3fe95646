//! Authentication Models
//! Mission: Define admin identity and token data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored admin account. The password hash never serializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt digest - never serialize
    pub name: String,
    #[serde(rename = "profileImage")]
    pub profile_image: String,
    pub role: AdminRole,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Admin roles. Only superadmins may delete other admins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdminRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "superadmin")]
    Superadmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Superadmin => "superadmin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(AdminRole::Admin),
            "superadmin" => Some(AdminRole::Superadmin),
            _ => None,
        }
    }
}

/// JWT claims payload. The subject is the admin username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Authenticated admin context attached to requests by the gate.
///
/// Resolved from the credential store on every request, so a deleted
/// admin is cut off immediately even with an unexpired token.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub username: String,
    pub name: String,
    pub profile_image: String,
    pub role: AdminRole,
}

impl CurrentAdmin {
    pub fn from_identity(identity: &AdminIdentity) -> Self {
        Self {
            username: identity.username.clone(),
            name: identity.name.clone(),
            profile_image: identity.profile_image.clone(),
            role: identity.role,
        }
    }
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: a bearer token good for one 10-minute session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Sanitized admin profile returned by `/admin/me`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub username: String,
    pub name: String,
    pub profile_image: String,
    pub role: AdminRole,
}

impl AdminProfile {
    pub fn from_current(admin: &CurrentAdmin) -> Self {
        Self {
            username: admin.username.clone(),
            name: admin.name.clone(),
            profile_image: admin.profile_image.clone(),
            role: admin.role,
        }
    }
}

/// Admin creation request. New accounts always get the `admin` role;
/// there is no escalation path through the API.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    #[serde(rename = "profileImage")]
    pub profile_image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&AdminRole::Superadmin).unwrap();
        assert_eq!(json, r#""superadmin""#);

        let role: AdminRole = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(role, AdminRole::Admin);
    }

    #[test]
    fn test_role_string_conversion() {
        assert_eq!(AdminRole::Admin.as_str(), "admin");
        assert_eq!(
            AdminRole::from_str("SUPERADMIN"),
            Some(AdminRole::Superadmin)
        );
        assert_eq!(AdminRole::from_str("root"), None);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let identity = AdminIdentity {
            username: "admin".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            name: "Admin".to_string(),
            profile_image: "/static/admin.png".to_string(),
            role: AdminRole::Admin,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_token_response_wire_shape() {
        let json = serde_json::to_value(TokenResponse {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
        })
        .unwrap();
        assert_eq!(json["accessToken"], "abc");
        assert_eq!(json["tokenType"], "bearer");
    }
}
