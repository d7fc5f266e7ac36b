/// The uniform response envelope
///
/// Every operation, success or failure, answers with the same shape:
///
/// ```json
/// { "success": true, "data": { ... }, "message": "Project created" }
/// { "success": false, "data": null, "message": "Project not found" }
/// ```
///
/// Handlers build success envelopes here; failure envelopes are
/// produced by [`crate::error::ApiError`]'s `IntoResponse`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every API payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,

    /// Payload on success, `null` on failure
    pub data: Option<T>,

    /// Human-readable outcome description
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Builds a success envelope around a payload
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }
}

impl ApiResponse<()> {
    /// Builds a failure envelope (data is always `null`)
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}

/// 201 response with a `Location` header and a success envelope
///
/// Used by every create handler.
pub fn created<T: Serialize>(location: String, body: ApiResponse<T>) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ApiResponse::success(42, "Answer retrieved");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert_eq!(json["message"], "Answer retrieved");
    }

    #[test]
    fn test_fail_envelope_has_null_data() {
        let envelope = ApiResponse::fail("Project not found");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "Project not found");
    }
}
