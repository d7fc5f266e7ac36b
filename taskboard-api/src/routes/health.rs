/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// Public; reports server liveness and database connectivity inside
/// the same envelope every other endpoint uses.

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Health check handler
pub async fn health_check(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    let database_status = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    let response = HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
    };

    Ok(Json(ApiResponse::success(response, "Health check completed")))
}
