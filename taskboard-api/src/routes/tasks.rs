/// Task endpoints
///
/// # Endpoints
///
/// - `GET    /projects/:project_id/tasks` — list a project's tasks *(authenticated)*
/// - `POST   /projects/:project_id/tasks` — create a task *(admin)*
/// - `PUT    /tasks/:id` — update title/description/status *(admin)*
/// - `DELETE /tasks/:id` — soft-delete a task *(admin)*
///
/// Tasks are addressed through their parent project for listing and
/// creation; both paths verify the project is live before touching
/// tasks. New tasks always start in `Todo`.

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

use taskboard_shared::models::project::Project;
use taskboard_shared::models::task::{CreateTask, Task, TaskStatus};

/// Task payload shape
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub project_id: i64,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            project_id: task.project_id,
        }
    }
}

/// Create task request
///
/// Status is not accepted at creation; every task starts as `Todo`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    pub description: Option<String>,
}

/// Update task request
///
/// The status arrives as a raw string and is validated against the
/// closed set after the task lookup.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    pub description: Option<String>,

    pub status: String,
}

/// Lists all tasks in a project
///
/// # Errors
///
/// - `404 Not Found`: the project does not exist or is soft-deleted
pub async fn list_tasks_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Vec<TaskResponse>>>> {
    if !Project::exists(&state.db, project_id).await? {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let tasks = Task::list_by_project(&state.db, project_id).await?;

    let response: Vec<TaskResponse> = tasks.into_iter().map(TaskResponse::from).collect();

    Ok(Json(ApiResponse::success(response, "Tasks listed")))
}

/// Creates a task in a project
///
/// # Errors
///
/// - `404 Not Found`: the parent project does not exist or is
///   soft-deleted
/// - `400 Bad Request`: empty title
pub async fn create_task(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(project_id): Path<i64>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    if !Project::exists(&state.db, project_id).await? {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            project_id,
        },
    )
    .await?;

    Ok(created(
        format!("/tasks/{}", task.id),
        ApiResponse::success(TaskResponse::from(task), "Task created"),
    ))
}

/// Updates a task's title, description, and status
///
/// The status string is checked only after the task is found, so a
/// request with a bad status against a missing task reports 404, and a
/// bad status against a live task reports 400 without writing anything.
pub async fn update_task(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<ApiResponse<TaskResponse>>> {
    req.validate()?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let status = TaskStatus::parse(&req.status).ok_or_else(|| {
        ApiError::BadRequest("Invalid status. Use: Todo, InProgress, Done".to_string())
    })?;

    let task = Task::update(&state.db, task.id, req.title, req.description, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        TaskResponse::from(task),
        "Task updated",
    )))
}

/// Soft-deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<String>>> {
    let deleted = Task::soft_delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(ApiResponse::success(
        "Task deleted".to_string(),
        "Task deleted",
    )))
}
