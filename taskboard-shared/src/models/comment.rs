/// Comment model and database operations
///
/// Comments attach to a task (hard containment) and carry an author
/// reference to a user (soft reference). The API validates the task
/// before the author at creation; the distinct error classes of those
/// two checks are externally observable.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id         INTEGER PRIMARY KEY AUTOINCREMENT,
///     content    TEXT NOT NULL,
///     task_id    INTEGER NOT NULL REFERENCES tasks (id),
///     user_id    INTEGER NOT NULL REFERENCES users (id),
///     is_deleted BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TEXT NOT NULL,
///     updated_at TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Comment model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment id
    pub id: i64,

    /// Comment body (non-empty)
    pub content: String,

    /// Task the comment belongs to
    pub task_id: i64,

    /// Authoring user
    pub user_id: i64,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// When the comment was created
    pub created_at: DateTime<Utc>,

    /// When the comment was last mutated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub content: String,
    pub task_id: i64,
    pub user_id: i64,
}

impl Comment {
    /// Creates a new comment
    ///
    /// Both references must have been validated as live by the caller.
    pub async fn create(pool: &SqlitePool, data: CreateComment) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, task_id, user_id, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, FALSE, $4, $4)
            RETURNING id, content, task_id, user_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(data.content)
        .bind(data.task_id)
        .bind(data.user_id)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Finds a live comment by id
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, task_id, user_id, is_deleted, created_at, updated_at
            FROM comments
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Lists live comments on a task, in insertion order
    pub async fn list_by_task(pool: &SqlitePool, task_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, task_id, user_id, is_deleted, created_at, updated_at
            FROM comments
            WHERE task_id = $1 AND is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }

    /// Overwrites the comment body, refreshing `updated_at`
    ///
    /// # Returns
    ///
    /// The updated comment, or `None` if no live row has this id.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        content: String,
    ) -> Result<Option<Self>, sqlx::Error> {
        let now = Utc::now();

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET content = $2, updated_at = $3
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, content, task_id, user_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Soft-deletes a comment
    ///
    /// # Returns
    ///
    /// `true` if a live row was deleted, `false` if the comment is
    /// missing or already deleted.
    pub async fn soft_delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE comments
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
