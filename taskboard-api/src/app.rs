/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::db::pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = pool::create_pool(config.database.pool_config()).await?;
/// let state = AppState::new(db, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::auth::require_auth};
use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                           # Health check (public)
/// ├── /auth/login                       # Login (public)
/// ├── /users                            # Users (authenticated; mutations admin)
/// │   ├── GET / POST /
/// │   ├── GET / DELETE /:id
/// │   └── PUT /:id/role
/// ├── /projects                         # Projects
/// │   ├── GET / POST /
/// │   ├── GET / PUT / DELETE /:id
/// │   ├── GET /user/:user_id
/// │   └── GET / POST /:id/tasks
/// ├── /tasks                            # Tasks
/// │   ├── PUT / DELETE /:id
/// │   └── GET / POST /:id/comments
/// └── /comments                         # Comments
///     └── PUT / DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (bearer token, everything except /health and /auth/login)
///
/// Admin gating is declared per handler via the `RequireAdmin`
/// extractor rather than a separate router layer.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/login", post(routes::auth::login));

    // Everything else requires a valid bearer token
    let protected_routes = Router::new()
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/:id",
            get(routes::users::get_user).delete(routes::users::delete_user),
        )
        .route("/users/:id/role", put(routes::users::update_user_role))
        .route(
            "/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/projects/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/projects/user/:user_id",
            get(routes::projects::list_projects_by_user),
        )
        // Parameter names must agree with the sibling `:id` routes or
        // the route matcher rejects the tree at startup.
        .route(
            "/projects/:id/tasks",
            get(routes::tasks::list_tasks_by_project).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route(
            "/tasks/:id/comments",
            get(routes::comments::list_comments_by_task).post(routes::comments::create_comment),
        )
        .route(
            "/comments/:id",
            put(routes::comments::update_comment).delete(routes::comments::delete_comment),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
