/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory database setup with migrations and admin bootstrap
/// - Test configuration
/// - JWT token generation for arbitrary identities
/// - Request/response helpers against the built router

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use sqlx::SqlitePool;
use tower::ServiceExt;

use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskboard_shared::auth::jwt::{create_token, Claims};
use taskboard_shared::db::{migrations, pool, seed};
use taskboard_shared::models::user::Role;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";
pub const TEST_ISSUER: &str = "taskboard";
pub const TEST_AUDIENCE: &str = "taskboard-clients";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    ///
    /// The database is migrated and seeded with the default admin
    /// account (admin/admin123), exactly like a first production boot.
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();

        // A single connection keeps every query on the same in-memory
        // database; each new in-memory connection would be a blank one.
        let db = pool::create_pool(pool::DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            create_if_missing: true,
        })
        .await?;

        migrations::run_migrations(&db).await?;
        seed::bootstrap_admin(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Issues a token for an arbitrary identity
    ///
    /// Bypasses the login endpoint so tests can mint tokens for roles
    /// and ids at will, including tokens the API would never hand out.
    pub fn token_for(&self, user_id: i64, username: &str, role: Role) -> String {
        let claims = Claims::new(
            user_id,
            username.to_string(),
            role,
            TEST_ISSUER,
            TEST_AUDIENCE,
            Duration::minutes(60),
        );
        create_token(&claims, TEST_SECRET).expect("token creation should succeed")
    }

    /// Token carrying the seeded admin identity
    pub fn admin_token(&self) -> String {
        self.token_for(1, "admin", Role::Admin)
    }

    /// Token carrying a plain user identity
    pub fn user_token(&self) -> String {
        self.token_for(2, "member", Role::User)
    }

    /// Token that expired an hour ago
    pub fn expired_token(&self) -> String {
        let claims = Claims::new(
            1,
            "admin".to_string(),
            Role::Admin,
            TEST_ISSUER,
            TEST_AUDIENCE,
            Duration::seconds(-3600),
        );
        create_token(&claims, TEST_SECRET).expect("token creation should succeed")
    }

    /// Sends a request and returns status, headers, and parsed body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, headers, json)
    }

    /// Shorthand for authenticated admin requests
    pub async fn admin(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let token = self.admin_token();
        self.send(method, uri, Some(&token), body).await
    }
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            issuer: TEST_ISSUER.to_string(),
            audience: TEST_AUDIENCE.to_string(),
            expire_minutes: 60,
        },
    }
}

/// Creates a user through the API and returns its id
pub async fn create_user(ctx: &TestContext, username: &str) -> i64 {
    let (status, _, body) = ctx
        .admin(
            "POST",
            "/users",
            Some(serde_json::json!({ "username": username, "password": "password1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create user: {body}");
    body["data"]["id"].as_i64().unwrap()
}

/// Creates a project through the API and returns its id
pub async fn create_project(ctx: &TestContext, name: &str, user_id: i64) -> i64 {
    let (status, _, body) = ctx
        .admin(
            "POST",
            "/projects",
            Some(serde_json::json!({ "name": name, "user_id": user_id })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create project: {body}");
    body["data"]["id"].as_i64().unwrap()
}

/// Creates a task through the API and returns its id
pub async fn create_task(ctx: &TestContext, project_id: i64, title: &str) -> i64 {
    let (status, _, body) = ctx
        .admin(
            "POST",
            &format!("/projects/{project_id}/tasks"),
            Some(serde_json::json!({ "title": title })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create task: {body}");
    body["data"]["id"].as_i64().unwrap()
}
