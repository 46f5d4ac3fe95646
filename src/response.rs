//! Response Envelopes
//! Mission: Keep the `{"success": true, ...}` wire shape consistent

use serde::Serialize;

/// `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{"success": true, "message": ...}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `{"success": true, "message": ..., "id": ...}` for creations.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_response_shape() {
        let json = serde_json::to_value(DataResponse::new(vec![1, 2, 3])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"][2], 3);
    }

    #[test]
    fn test_created_response_shape() {
        let json =
            serde_json::to_value(CreatedResponse::new("Project created successfully", "abc"))
                .unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["id"], "abc");
    }
}
