/// Integration tests for the first-run admin bootstrap

use taskboard_shared::auth::password::verify_password;
use taskboard_shared::db::migrations::run_migrations;
use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
use taskboard_shared::db::seed::{
    bootstrap_admin, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME,
};
use taskboard_shared::models::user::{Role, User};

async fn test_pool() -> sqlx::SqlitePool {
    let pool = create_pool(DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        create_if_missing: true,
    })
    .await
    .expect("pool should connect");

    run_migrations(&pool).await.expect("migrations should apply");
    pool
}

#[tokio::test]
async fn test_bootstrap_creates_single_admin() {
    let pool = test_pool().await;

    let created = bootstrap_admin(&pool).await.unwrap();
    let admin = created.expect("empty store should be seeded");

    assert_eq!(admin.username, DEFAULT_ADMIN_USERNAME);
    assert_eq!(admin.role, Role::Admin);
    // Stored hashed, never plaintext.
    assert_ne!(admin.password_hash, DEFAULT_ADMIN_PASSWORD);
    assert!(verify_password(DEFAULT_ADMIN_PASSWORD, &admin.password_hash).unwrap());

    let users = User::list(&pool).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_bootstrap_is_noop_on_second_run() {
    let pool = test_pool().await;

    assert!(bootstrap_admin(&pool).await.unwrap().is_some());
    assert!(bootstrap_admin(&pool).await.unwrap().is_none());

    let users = User::list(&pool).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_bootstrap_skipped_when_any_live_user_exists() {
    let pool = test_pool().await;

    let seeded = bootstrap_admin(&pool).await.unwrap().unwrap();

    // Even after deleting the admin, a fresh bootstrap only runs if no
    // live user remains; here it does run again because the store is
    // empty of live rows.
    User::soft_delete(&pool, seeded.id).await.unwrap();
    assert!(bootstrap_admin(&pool).await.unwrap().is_some());
}
