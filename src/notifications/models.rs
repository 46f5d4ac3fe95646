//! Notification Models
//! Mission: Typed audit events for the admin feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of an audit/notification event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
    Message,
    User,
    Update,
    Security,
    Create,
    Delete,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
            NotificationType::Message => "message",
            NotificationType::User => "user",
            NotificationType::Update => "update",
            NotificationType::Security => "security",
            NotificationType::Create => "create",
            NotificationType::Delete => "delete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "info" => Some(NotificationType::Info),
            "success" => Some(NotificationType::Success),
            "warning" => Some(NotificationType::Warning),
            "error" => Some(NotificationType::Error),
            "message" => Some(NotificationType::Message),
            "user" => Some(NotificationType::User),
            "update" => Some(NotificationType::Update),
            "security" => Some(NotificationType::Security),
            "create" => Some(NotificationType::Create),
            "delete" => Some(NotificationType::Delete),
            _ => None,
        }
    }
}

/// One entry in the process-wide append-only admin feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_serialization() {
        let json = serde_json::to_string(&NotificationType::Security).unwrap();
        assert_eq!(json, r#""security""#);

        let kind: NotificationType = serde_json::from_str(r#""delete""#).unwrap();
        assert_eq!(kind, NotificationType::Delete);
    }

    #[test]
    fn test_type_string_roundtrip() {
        for kind in [
            NotificationType::Info,
            NotificationType::Success,
            NotificationType::Warning,
            NotificationType::Error,
            NotificationType::Message,
            NotificationType::User,
            NotificationType::Update,
            NotificationType::Security,
            NotificationType::Create,
            NotificationType::Delete,
        ] {
            assert_eq!(NotificationType::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationType::from_str("alert"), None);
    }

    #[test]
    fn test_notification_wire_shape() {
        let n = Notification {
            id: "abc".to_string(),
            message: "SUCCESS Login: Admin admin logged in".to_string(),
            kind: NotificationType::Security,
            read: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "security");
        assert_eq!(json["read"], false);
        assert!(json.get("createdAt").is_some());
    }
}
