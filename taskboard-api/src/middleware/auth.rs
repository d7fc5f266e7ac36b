/// The authorization gate
///
/// Two composable check levels, both running strictly before the
/// guarded handler:
///
/// 1. **Authenticated** — [`require_auth`] is layered on the protected
///    router. It extracts the bearer token, validates signature,
///    issuer, audience, and expiry, and injects an [`AuthContext`]
///    into request extensions. Any failure is a 401 envelope.
/// 2. **Role-Restricted** — handlers that mutate declare a
///    [`RequireAdmin`] parameter. The extractor reads the
///    authenticated context and rejects non-admin callers with a 403
///    envelope.
///
/// Requirements are declared per route (layer + extractor signature),
/// never checked inline in handler bodies.
///
/// # Example
///
/// ```ignore
/// async fn list_projects(auth: AuthContext, ...) -> ApiResult<...> { ... }
/// async fn create_project(RequireAdmin(auth): RequireAdmin, ...) -> ApiResult<...> { ... }
/// ```

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::{app::AppState, error::ApiError};
use taskboard_shared::auth::jwt::{self, Claims};
use taskboard_shared::models::user::Role;

/// Authenticated identity attached to request extensions
///
/// Carries the verified token claims; handlers extract it directly as
/// a parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user id (token subject)
    pub user_id: i64,

    /// Username claim
    pub username: String,

    /// Role claim at issuance time
    pub role: Role,
}

impl AuthContext {
    /// Creates the context from validated claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username.clone(),
            role: claims.role,
        }
    }

    /// Whether the caller holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Bearer-token authentication middleware
///
/// Layered on every protected route. Missing, malformed, expired, or
/// otherwise invalid credentials all map to 401; the guarded handler
/// never runs on failure.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_token(
        token,
        &state.config.jwt.secret,
        &state.config.jwt.issuer,
        &state.config.jwt.audience,
    )?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))
    }
}

/// Declared admin requirement for mutating routes
///
/// Wraps the authenticated context; extraction fails with 403 when the
/// role claim is not `Admin`.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthContext::from_request_parts(parts, state).await?;

        if !auth.is_admin() {
            return Err(ApiError::Forbidden("Admin role required".to_string()));
        }

        Ok(RequireAdmin(auth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_auth_context_from_claims() {
        let claims = Claims::new(
            7,
            "alice".to_string(),
            Role::Admin,
            "taskboard",
            "taskboard-clients",
            Duration::minutes(60),
        );

        let context = AuthContext::from_claims(&claims);

        assert_eq!(context.user_id, 7);
        assert_eq!(context.username, "alice");
        assert!(context.is_admin());
    }

    #[test]
    fn test_non_admin_context() {
        let claims = Claims::new(
            8,
            "bob".to_string(),
            Role::User,
            "taskboard",
            "taskboard-clients",
            Duration::minutes(60),
        );

        let context = AuthContext::from_claims(&claims);
        assert!(!context.is_admin());
    }
}
