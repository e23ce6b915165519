//! Success envelopes shared by the resource routers.
//!
//! - reads: `{"status": "success", "data": ...}`
//! - creates: `{"message": "...", "id": "<hex>"}` with 201
//! - updates and deletes: `{"status": "success", "message": "..."}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

const SUCCESS: &str = "success";

/// Read envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `success`
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: SUCCESS,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Create envelope, always sent with 201
#[derive(Debug, Serialize, ToSchema)]
pub struct Created {
    pub message: String,
    /// Hex ObjectId of the new document
    pub id: String,
}

impl Created {
    pub fn new(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: id.into(),
        }
    }
}

impl IntoResponse for Created {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Update and delete envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusMessage {
    /// Always `success`
    pub status: &'static str,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: SUCCESS,
            message: message.into(),
        }
    }
}

impl IntoResponse for StatusMessage {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shapes() {
        assert_eq!(
            serde_json::to_value(ApiResponse::success(json!({"name": "Lamp"}))).unwrap(),
            json!({"status": "success", "data": {"name": "Lamp"}})
        );
        assert_eq!(
            serde_json::to_value(Created::new("Product created successfully", "abc")).unwrap(),
            json!({"message": "Product created successfully", "id": "abc"})
        );
        assert_eq!(
            serde_json::to_value(StatusMessage::success("User deleted successfully")).unwrap(),
            json!({"status": "success", "message": "User deleted successfully"})
        );
    }

    #[test]
    fn test_created_status_code() {
        assert_eq!(Created::new("ok", "id").into_response().status(), StatusCode::CREATED);
    }
}
