/// User endpoints
///
/// # Endpoints
///
/// - `GET    /users` — list users *(authenticated)*
/// - `GET    /users/:id` — get one user *(authenticated)*
/// - `POST   /users` — create a user with role `User` *(admin)*
/// - `PUT    /users/:id/role` — change a user's role *(admin)*
/// - `DELETE /users/:id` — soft-delete a user *(admin)*

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::RequireAdmin,
    response::{created, ApiResponse},
};
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use taskboard_shared::auth::password;
use taskboard_shared::models::user::{CreateUser, Role, User};

/// User payload shape (no credential material)
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Role change request
///
/// The role arrives as a raw string and is validated against the
/// closed set before the store is touched.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Lists all users
pub async fn list_users(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = User::list(&state.db).await?;

    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(ApiResponse::success(response, "Users listed")))
}

/// Gets one user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        UserResponse::from(user),
        "User retrieved",
    )))
}

/// Creates a user (always role `User`; roles are granted separately)
///
/// # Errors
///
/// - `400 Bad Request`: empty field, or a live user already holds the
///   username (a soft-deleted holder does not block the name)
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    if User::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest("Username already exists".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password_hash,
            role: Role::User,
        },
    )
    .await?;

    Ok(created(
        format!("/users/{}", user.id),
        ApiResponse::success(UserResponse::from(user), "User created"),
    ))
}

/// Changes a user's role
///
/// The closed-set check happens before any store access; an invalid
/// role never reaches the database.
pub async fn update_user_role(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<Json<ApiResponse<String>>> {
    let role = Role::parse(&req.role)
        .ok_or_else(|| ApiError::BadRequest("Invalid role. Use: Admin, User".to_string()))?;

    User::update_role(&state.db, id, role)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        "Role updated".to_string(),
        "Role updated",
    )))
}

/// Soft-deletes a user
///
/// Deleting twice fails the second time with 404; soft-delete is not
/// an idempotent success.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<String>>> {
    let deleted = User::soft_delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(ApiResponse::success(
        "User deleted".to_string(),
        "User deleted",
    )))
}
