//! # Taskboard API Server
//!
//! HTTP backend for a task tracker: users own projects, projects hold
//! tasks, tasks carry comments. Reads require a bearer token, writes
//! require the Admin role, and deletes are soft.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=<at least 32 bytes> cargo run -p taskboard-api
//! ```

use taskboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskboard_shared::db::{migrations, pool, seed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(config.database.pool_config()).await?;
    migrations::run_migrations(&db).await?;

    if let Some(admin) = seed::bootstrap_admin(&db).await? {
        tracing::info!(username = %admin.username, "Seeded default admin account");
    }

    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{bind_address}");

    axum::serve(listener, app).await?;

    Ok(())
}
