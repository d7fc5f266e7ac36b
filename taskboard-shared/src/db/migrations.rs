/// Database migration runner
///
/// Runs the SQL migrations embedded from the workspace `migrations/`
/// directory using sqlx's migration system. Migrations are applied in
/// version order and recorded in the `_sqlx_migrations` table, so
/// running them repeatedly is safe.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskboard_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: "sqlite::memory:".to_string(),
///     ..Default::default()
/// })
/// .await?;
///
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the database
/// connection is lost mid-run.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_migrations_apply_and_rerun() {
        let pool = create_pool(DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            create_if_missing: true,
        })
        .await
        .expect("pool should connect");

        run_migrations(&pool).await.expect("first run should apply");

        // Re-running against the same database is a no-op.
        run_migrations(&pool).await.expect("second run should be a no-op");

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert!(names.contains(&"users"));
        assert!(names.contains(&"projects"));
        assert!(names.contains(&"tasks"));
        assert!(names.contains(&"comments"));
    }
}
