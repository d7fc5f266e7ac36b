/// Comment endpoints
///
/// # Endpoints
///
/// - `GET    /tasks/:task_id/comments` — list a task's comments *(authenticated)*
/// - `POST   /tasks/:task_id/comments` — create a comment *(admin)*
/// - `PUT    /comments/:id` — update content *(admin)*
/// - `DELETE /comments/:id` — soft-delete a comment *(admin)*
///
/// Comments hang off a task and carry an author reference. On create,
/// the task is verified first and the author second; a request with
/// both a missing task and a bad author reports the missing task.

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

use taskboard_shared::models::comment::{Comment, CreateComment};
use taskboard_shared::models::task::Task;
use taskboard_shared::models::user::User;

/// Comment payload shape
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
    pub task_id: i64,
    pub user_id: i64,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            task_id: comment.task_id,
            user_id: comment.user_id,
        }
    }
}

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    pub user_id: i64,
}

/// Update comment request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
}

/// Lists all comments on a task
///
/// # Errors
///
/// - `404 Not Found`: the task does not exist or is soft-deleted
pub async fn list_comments_by_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Vec<CommentResponse>>>> {
    if !Task::exists(&state.db, task_id).await? {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    let comments = Comment::list_by_task(&state.db, task_id).await?;

    let response: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();

    Ok(Json(ApiResponse::success(response, "Comments listed")))
}

/// Creates a comment on a task
///
/// # Errors
///
/// - `404 Not Found`: the parent task does not exist or is soft-deleted
///   (checked before the author)
/// - `400 Bad Request`: empty content, or `user_id` does not reference
///   a live user ("UserId is invalid")
pub async fn create_comment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(task_id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    if !Task::exists(&state.db, task_id).await? {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    if !User::exists(&state.db, req.user_id).await? {
        return Err(ApiError::BadRequest("UserId is invalid".to_string()));
    }

    let comment = Comment::create(
        &state.db,
        CreateComment {
            content: req.content,
            task_id,
            user_id: req.user_id,
        },
    )
    .await?;

    Ok(created(
        format!("/comments/{}", comment.id),
        ApiResponse::success(CommentResponse::from(comment), "Comment created"),
    ))
}

/// Updates a comment's content
pub async fn update_comment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCommentRequest>,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    req.validate()?;

    let comment = Comment::update(&state.db, id, req.content)
        .await?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        CommentResponse::from(comment),
        "Comment updated",
    )))
}

/// Soft-deletes a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<String>>> {
    let deleted = Comment::soft_delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }

    Ok(Json(ApiResponse::success(
        "Comment deleted".to_string(),
        "Comment deleted",
    )))
}
