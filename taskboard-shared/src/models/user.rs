/// User model and database operations
///
/// Users authenticate with a username and password and carry a role
/// that gates mutating API operations. Usernames are unique among live
/// (non-deleted) rows only; soft-deleting a user frees the name.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id            INTEGER PRIMARY KEY AUTOINCREMENT,
///     username      TEXT NOT NULL,
///     password_hash TEXT NOT NULL,
///     role          TEXT NOT NULL DEFAULT 'User',
///     is_deleted    BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at    TEXT NOT NULL,
///     updated_at    TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// User role, a closed two-value set
///
/// Stored as text (`Admin` / `User`). Values outside the set are
/// rejected at the API boundary before any write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Role {
    /// Full access, including all mutating operations
    Admin,

    /// Read access to every entity
    User,
}

impl Role {
    /// Converts the role to its storage/wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    /// Parses a role from its exact string form
    ///
    /// Matching is case-sensitive; anything outside the closed set
    /// yields `None` rather than being normalized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Role::Admin),
            "User" => Some(Role::User),
            _ => None,
        }
    }
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user id
    pub id: i64,

    /// Username, unique among live rows (case-sensitive)
    pub username: String,

    /// Argon2id password hash (PHC string format)
    pub password_hash: String,

    /// Role gating mutating operations
    pub role: Role,

    /// Soft-delete flag; deleted rows are invisible to reads
    pub is_deleted: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last mutated (including soft-delete)
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Username (caller must have checked uniqueness among live rows)
    pub username: String,

    /// Argon2id password hash (NOT a plaintext password)
    pub password_hash: String,

    /// Initial role
    pub role: Role,
}

impl User {
    /// Creates a new user
    ///
    /// Both timestamps are set to the insertion time and the row starts
    /// live. The partial unique index on live usernames is the backstop
    /// for concurrent creates; callers should check
    /// [`User::find_by_username`] first to produce the friendly error.
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails, including the
    /// unique-index violation for a racing duplicate username.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, FALSE, $4, $4)
            RETURNING id, username, password_hash, role, is_deleted, created_at, updated_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a live user by id
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, is_deleted, created_at, updated_at
            FROM users
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a live user by exact username
    ///
    /// Used both for login and for the duplicate-username check.
    /// Soft-deleted holders of the name are not visible here.
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, is_deleted, created_at, updated_at
            FROM users
            WHERE username = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all live users in insertion order
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, is_deleted, created_at, updated_at
            FROM users
            WHERE is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Checks whether a live user with this id exists
    ///
    /// Cheaper than [`User::find_by_id`] when only referential
    /// validation is needed.
    pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND is_deleted = FALSE)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(row.0 != 0)
    }

    /// Checks whether any live user exists at all
    ///
    /// Drives the first-run admin bootstrap.
    pub async fn any_live(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE is_deleted = FALSE)")
                .fetch_one(pool)
                .await?;

        Ok(row.0 != 0)
    }

    /// Changes a user's role, refreshing `updated_at`
    ///
    /// # Returns
    ///
    /// The updated user, or `None` if no live row has this id.
    pub async fn update_role(
        pool: &SqlitePool,
        id: i64,
        role: Role,
    ) -> Result<Option<Self>, sqlx::Error> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2, updated_at = $3
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING id, username, password_hash, role, is_deleted, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(role)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Soft-deletes a user
    ///
    /// Sets `is_deleted` and refreshes `updated_at`. A second call for
    /// the same id finds no live row and returns `false`; the failure
    /// is deliberate, not a no-op success.
    ///
    /// # Returns
    ///
    /// `true` if a live row was deleted, `false` otherwise.
    pub async fn soft_delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE users
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
