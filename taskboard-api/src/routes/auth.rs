/// Login endpoint
///
/// # Endpoint
///
/// - `POST /auth/login` — authenticate with username + password, get
///   a bearer token
///
/// Failure is deliberately uniform: an unknown username and a wrong
/// password for a known username produce the identical 401 message, so
/// the response never reveals which field was wrong.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use taskboard_shared::auth::{jwt, password};
use taskboard_shared::models::user::{Role, User};

/// The single credential-failure message; shared by both failure modes
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username (case-sensitive, exact match)
    pub username: String,

    /// Password
    pub password: String,
}

/// Login payload inside the success envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginData {
    /// Bearer token for subsequent calls
    pub token: String,

    /// Authenticated username
    pub username: String,

    /// Authenticated role
    pub role: Role,
}

/// Login handler
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// { "username": "admin", "password": "admin123" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: unknown username or wrong password
///   (indistinguishable by design)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginData>>> {
    let candidate = User::find_by_username(&state.db, &req.username).await?;

    let user = match candidate {
        Some(user) => {
            if password::verify_password(&req.password, &user.password_hash)? {
                Some(user)
            } else {
                None
            }
        }
        None => None,
    };

    let Some(user) = user else {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let claims = jwt::Claims::new(
        user.id,
        user.username.clone(),
        user.role,
        &state.config.jwt.issuer,
        &state.config.jwt.audience,
        state.config.jwt.expiry(),
    );
    let token = jwt::create_token(&claims, &state.config.jwt.secret)?;

    Ok(Json(ApiResponse::success(
        LoginData {
            token,
            username: user.username,
            role: user.role,
        },
        "Login successful",
    )))
}
