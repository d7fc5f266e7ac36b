/// Project model and database operations
///
/// Projects are owned by a user (soft reference, validated by the API
/// at creation) and contain tasks.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     name        TEXT NOT NULL,
///     description TEXT,
///     user_id     INTEGER NOT NULL REFERENCES users (id),
///     is_deleted  BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at  TEXT NOT NULL,
///     updated_at  TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project id
    pub id: i64,

    /// Project name (non-empty)
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Owning user id
    pub user_id: i64,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last mutated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
}

impl Project {
    /// Creates a new project
    ///
    /// The owning user must have been validated as live by the caller;
    /// this layer does not re-check references.
    pub async fn create(pool: &SqlitePool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, user_id, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, FALSE, $4, $4)
            RETURNING id, name, description, user_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.user_id)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a live project by id
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, user_id, is_deleted, created_at, updated_at
            FROM projects
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all live projects in insertion order
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, user_id, is_deleted, created_at, updated_at
            FROM projects
            WHERE is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Lists live projects owned by a user
    ///
    /// An unknown user id simply yields an empty list; there is no
    /// parent pre-check on this path.
    pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, user_id, is_deleted, created_at, updated_at
            FROM projects
            WHERE user_id = $1 AND is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Checks whether a live project with this id exists
    pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(row.0 != 0)
    }

    /// Overwrites name and description, refreshing `updated_at`
    ///
    /// # Returns
    ///
    /// The updated project, or `None` if no live row has this id.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        name: String,
        description: Option<String>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let now = Utc::now();

        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $2, description = $3, updated_at = $4
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, name, description, user_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Soft-deletes a project
    ///
    /// # Returns
    ///
    /// `true` if a live row was deleted, `false` if the project is
    /// missing or already deleted.
    pub async fn soft_delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE projects
            SET is_deleted = TRUE, updated_at = $2
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
