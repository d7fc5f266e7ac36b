/// Task model and database operations
///
/// Tasks live inside a project (hard containment, validated by the API
/// at creation) and carry a status from a closed three-value set.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     title       TEXT NOT NULL,
///     description TEXT,
///     status      TEXT NOT NULL DEFAULT 'Todo',
///     project_id  INTEGER NOT NULL REFERENCES projects (id),
///     is_deleted  BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at  TEXT NOT NULL,
///     updated_at  TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Task status, a closed three-value set
///
/// Despite looking like a workflow, no ordering is enforced: any value
/// in the set is reachable from any other in one update. Values
/// outside the set are rejected at the API boundary, never normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum TaskStatus {
    /// Not started (the creation default)
    Todo,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Converts the status to its storage/wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Done => "Done",
        }
    }

    /// Parses a status from its exact string form
    ///
    /// Case-sensitive; anything outside the closed set yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Todo" => Some(TaskStatus::Todo),
            "InProgress" => Some(TaskStatus::InProgress),
            "Done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id
    pub id: i64,

    /// Task title (non-empty)
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Containing project id
    pub project_id: i64,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last mutated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// Status is not an input; new tasks always start at `Todo`.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub project_id: i64,
}

impl Task {
    /// Creates a new task with status `Todo`
    ///
    /// The containing project must have been validated as live by the
    /// caller.
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, project_id, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, $5)
            RETURNING id, title, description, status, project_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(TaskStatus::Todo)
        .bind(data.project_id)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a live task by id
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, project_id, is_deleted, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists live tasks in a project, in insertion order
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, project_id, is_deleted, created_at, updated_at
            FROM tasks
            WHERE project_id = $1 AND is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Checks whether a live task with this id exists
    pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(row.0 != 0)
    }

    /// Overwrites title, description, and status, refreshing `updated_at`
    ///
    /// The status must already be validated against the closed set;
    /// this layer takes the typed value and cannot receive an invalid
    /// one.
    ///
    /// # Returns
    ///
    /// The updated task, or `None` if no live row has this id.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        title: String,
        description: Option<String>,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let now = Utc::now();

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, status = $4, updated_at = $5
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, title, description, status, project_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Soft-deletes a task
    ///
    /// # Returns
    ///
    /// `true` if a live row was deleted, `false` if the task is missing
    /// or already deleted.
    pub async fn soft_delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE tasks
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "Todo");
        assert_eq!(TaskStatus::InProgress.as_str(), "InProgress");
        assert_eq!(TaskStatus::Done.as_str(), "Done");
    }

    #[test]
    fn test_status_parse_exact() {
        assert_eq!(TaskStatus::parse("Todo"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse("InProgress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("Done"), Some(TaskStatus::Done));
    }

    #[test]
    fn test_status_parse_rejects_outside_set() {
        assert_eq!(TaskStatus::parse("todo"), None);
        assert_eq!(TaskStatus::parse("IN_PROGRESS"), None);
        assert_eq!(TaskStatus::parse("Archived"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }
}
