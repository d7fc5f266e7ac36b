/// Project endpoints
///
/// # Endpoints
///
/// - `GET    /projects` — list projects *(authenticated)*
/// - `GET    /projects/:id` — get one project *(authenticated)*
/// - `GET    /projects/user/:user_id` — list a user's projects *(authenticated)*
/// - `POST   /projects` — create a project *(admin)*
/// - `PUT    /projects/:id` — update name/description *(admin)*
/// - `DELETE /projects/:id` — soft-delete a project *(admin)*
///
/// The owner reference is a soft relation: an unknown `user_id` at
/// creation is a 400, and listing by an unknown user is an empty 200.

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

use taskboard_shared::models::project::{CreateProject, Project};
use taskboard_shared::models::user::User;

/// Project payload shape
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            user_id: project.user_id,
        }
    }
}

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    pub description: Option<String>,

    pub user_id: i64,
}

/// Update project request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    pub description: Option<String>,
}

/// Lists all projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ProjectResponse>>>> {
    let projects = Project::list(&state.db).await?;

    let response: Vec<ProjectResponse> = projects.into_iter().map(ProjectResponse::from).collect();

    Ok(Json(ApiResponse::success(response, "Projects listed")))
}

/// Gets one project by id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<ProjectResponse>>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        ProjectResponse::from(project),
        "Project retrieved",
    )))
}

/// Lists projects owned by a user
///
/// No parent pre-check on this path: an unknown user yields an empty
/// list, not an error.
pub async fn list_projects_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Vec<ProjectResponse>>>> {
    let projects = Project::list_by_user(&state.db, user_id).await?;

    let response: Vec<ProjectResponse> = projects.into_iter().map(ProjectResponse::from).collect();

    Ok(Json(ApiResponse::success(response, "User projects listed")))
}

/// Creates a project
///
/// # Errors
///
/// - `400 Bad Request`: empty name, or `user_id` does not reference a
///   live user (soft reference, "UserId is invalid")
pub async fn create_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    if !User::exists(&state.db, req.user_id).await? {
        return Err(ApiError::BadRequest("UserId is invalid".to_string()));
    }

    let project = Project::create(
        &state.db,
        CreateProject {
            name: req.name,
            description: req.description,
            user_id: req.user_id,
        },
    )
    .await?;

    Ok(created(
        format!("/projects/{}", project.id),
        ApiResponse::success(ProjectResponse::from(project), "Project created"),
    ))
}

/// Updates a project's name and description
pub async fn update_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ApiResponse<ProjectResponse>>> {
    req.validate()?;

    let project = Project::update(&state.db, id, req.name, req.description)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(ApiResponse::success(
        ProjectResponse::from(project),
        "Project updated",
    )))
}

/// Soft-deletes a project
pub async fn delete_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<String>>> {
    let deleted = Project::soft_delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }

    Ok(Json(ApiResponse::success(
        "Project deleted".to_string(),
        "Project deleted",
    )))
}
