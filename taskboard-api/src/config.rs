/// Configuration management for the API server
///
/// Loads configuration from environment variables (with `.env` support
/// for development) into a type-safe struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `DATABASE_URL`: SQLite connection string (default: sqlite:taskboard.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `JWT_SECRET`: Secret key for JWT signing (required, >= 32 chars)
/// - `JWT_ISSUER`: Issuer claim (default: taskboard)
/// - `JWT_AUDIENCE`: Audience claim (default: taskboard-clients)
/// - `JWT_EXPIRE_MINUTES`: Access token lifetime (default: 60)
/// - `RUST_LOG`: Log level filter

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// JWT configuration
///
/// The signing key, issuer, audience, and expiry window are deployment
/// configuration, not data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for JWT signing
    ///
    /// Must be kept secret and at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    /// Issuer claim stamped into and required of every token
    pub issuer: String,

    /// Audience claim stamped into and required of every token
    pub audience: String,

    /// Access token lifetime in minutes
    pub expire_minutes: i64,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or too short, or if
    /// a numeric variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:taskboard.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let jwt_issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "taskboard".to_string());
        let jwt_audience =
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| "taskboard-clients".to_string());

        let expire_minutes = env::var("JWT_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<i64>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                issuer: jwt_issuer,
                audience: jwt_audience,
                expire_minutes,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

impl DatabaseConfig {
    /// Converts to the pool configuration used by the shared crate
    pub fn pool_config(&self) -> taskboard_shared::db::pool::DatabaseConfig {
        taskboard_shared::db::pool::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            create_if_missing: true,
        }
    }
}

impl JwtConfig {
    /// Access token lifetime as a chrono duration
    pub fn expiry(&self) -> Duration {
        Duration::minutes(self.expire_minutes)
    }
}
