/// First-run admin bootstrap
///
/// On startup, if the store holds no live user at all, a single
/// default Admin account is inserted so the API is reachable. The
/// check runs against live rows only; once any user exists (including
/// the seeded one), the bootstrap is a no-op forever after.
///
/// The default credentials are a bootstrap affordance, not a runtime
/// feature; deployments are expected to change them immediately.

use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password::{hash_password, PasswordError};
use crate::models::user::{CreateUser, Role, User};

/// Username of the seeded default administrator
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password of the seeded default administrator (stored hashed)
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Error type for the bootstrap path
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Database error during the check or insert
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to hash the default password
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Seeds the default admin account if the store is empty
///
/// # Returns
///
/// `Some(user)` if an admin was created, `None` if the store already
/// held a live user.
///
/// # Errors
///
/// Returns an error if the existence check, password hashing, or the
/// insert fails.
pub async fn bootstrap_admin(pool: &SqlitePool) -> Result<Option<User>, SeedError> {
    if User::any_live(pool).await? {
        return Ok(None);
    }

    let password_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;

    let admin = User::create(
        pool,
        CreateUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password_hash,
            role: Role::Admin,
        },
    )
    .await?;

    info!(user_id = admin.id, "Seeded default admin account");
    Ok(Some(admin))
}
