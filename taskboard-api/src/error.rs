/// Error handling for the API server
///
/// A unified error type that maps the failure taxonomy to HTTP
/// responses. All handlers return `Result<T, ApiError>`; the
/// `IntoResponse` impl renders the failure envelope with the matching
/// status code:
///
/// - `BadRequest` (400): invalid reference, invalid role/status,
///   duplicate username, empty required field
/// - `Unauthorized` (401): missing, malformed, invalid, or expired
///   token; failed login
/// - `Forbidden` (403): valid token, insufficient role
/// - `NotFound` (404): target or hard-parent row absent or soft-deleted
/// - `Internal` (500): database or hashing failure; details are logged,
///   never exposed
///
/// # Example
///
/// ```ignore
/// async fn handler(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<ProjectResponse>>> {
///     let project = Project::find_by_id(&state.db, 1)
///         .await?
///         .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;
///     // ...
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

use crate::response::ApiResponse;
use taskboard_shared::auth::jwt::JwtError;
use taskboard_shared::auth::password::PasswordError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Internal server error (500)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients.
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::fail(message))).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// A unique-index violation on the live-username index surfaces as the
/// same duplicate-username message the pre-check produces, so the
/// concurrent-signup race is indistinguishable from the common case.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.message().contains("users.username") {
                    return ApiError::BadRequest("Username already exists".to_string());
                }
                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert JWT errors to API errors
///
/// Every token failure is a 401; the variant only shapes the message.
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidIssuer => ApiError::Unauthorized("Invalid token issuer".to_string()),
            JwtError::InvalidAudience => {
                ApiError::Unauthorized("Invalid token audience".to_string())
            }
            _ => ApiError::Unauthorized(format!("Invalid token: {}", err)),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert request validation errors to API errors
///
/// The first field failure becomes the message; the envelope carries a
/// single string, not a field map.
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
            })
            .next()
            .unwrap_or_else(|| "Request validation failed".to_string());

        ApiError::BadRequest(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid status. Use: Todo, InProgress, Done".to_string());
        assert_eq!(
            err.to_string(),
            "Bad request: Invalid status. Use: Todo, InProgress, Done"
        );

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_into_response_status_codes() {
        let cases = vec![
            (
                ApiError::BadRequest("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Unauthorized("x".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                ApiError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_jwt_expired_maps_to_unauthorized() {
        let err: ApiError = JwtError::Expired.into();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
