/// JWT access token generation and validation
///
/// Tokens are signed with HS256 and carry the authenticated identity
/// (user id, username, role) plus the standard issuer, audience, and
/// expiry claims. Expiry is the only invalidation mechanism; there is
/// no revocation list.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{create_token, validate_token, Claims};
/// use taskboard_shared::models::user::Role;
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let claims = Claims::new(
///     7,
///     "alice".to_string(),
///     Role::Admin,
///     "taskboard",
///     "taskboard-clients",
///     Duration::minutes(60),
/// );
///
/// let token = create_token(&claims, secret)?;
/// let validated = validate_token(&token, secret, "taskboard", "taskboard-clients")?;
/// assert_eq!(validated.sub, 7);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Issuer claim did not match the configured issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,

    /// Audience claim did not match the configured audience
    #[error("Invalid token audience")]
    InvalidAudience,
}

/// JWT claims structure
///
/// # Standard Claims
///
/// - `sub`: Subject (user id)
/// - `iss`: Issuer (deployment configuration)
/// - `aud`: Audience (deployment configuration)
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
///
/// # Custom Claims
///
/// - `username`: Username at issuance time
/// - `role`: Role at issuance time (role changes do not revoke
///   outstanding tokens; they age out at expiry)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: i64,

    /// Username claim
    pub username: String,

    /// Role claim
    pub role: Role,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims expiring `expires_in` from now
    pub fn new(
        user_id: i64,
        username: String,
        role: Role,
        issuer: &str,
        audience: &str,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            username,
            role,
            iss: issuer.to_string(),
            aud: audience.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed JWT from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT and extracts its claims
///
/// Verifies the signature, expiry, issuer, and audience. Any failure
/// maps to a specific [`JwtError`] variant so the boundary can log it,
/// but all of them surface to clients as the same 401.
///
/// # Errors
///
/// Returns an error if the signature is invalid, the token has
/// expired, or the issuer/audience claims do not match.
pub fn validate_token(
    token: &str,
    secret: &str,
    issuer: &str,
    audience: &str,
) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[issuer]);
    validation.set_audience(&[audience]);
    validation.validate_exp = true;
    // No grace window: a token is invalid the second `exp` passes.
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        jsonwebtoken::errors::ErrorKind::InvalidAudience => JwtError::InvalidAudience,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";
    const ISSUER: &str = "taskboard";
    const AUDIENCE: &str = "taskboard-clients";

    fn test_claims(expires_in: Duration) -> Claims {
        Claims::new(
            42,
            "alice".to_string(),
            Role::Admin,
            ISSUER,
            AUDIENCE,
            expires_in,
        )
    }

    #[test]
    fn test_claims_creation() {
        let claims = test_claims(Duration::minutes(60));

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.aud, AUDIENCE);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = test_claims(Duration::minutes(60));
        let token = create_token(&claims, SECRET).expect("Should create token");

        let validated =
            validate_token(&token, SECRET, ISSUER, AUDIENCE).expect("Should validate token");
        assert_eq!(validated.sub, 42);
        assert_eq!(validated.username, "alice");
        assert_eq!(validated.role, Role::Admin);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = test_claims(Duration::minutes(60));
        let token = create_token(&claims, SECRET).expect("Should create token");

        let result = validate_token(&token, "a-completely-different-secret-key", ISSUER, AUDIENCE);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        // Expired an hour ago.
        let claims = test_claims(Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = validate_token(&token, SECRET, ISSUER, AUDIENCE);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_token_just_past_expiry() {
        // 30 seconds stale sits inside jsonwebtoken's default leeway;
        // it must still be rejected.
        let claims = test_claims(Duration::seconds(-30));
        let token = create_token(&claims, SECRET).expect("Should create token");

        let result = validate_token(&token, SECRET, ISSUER, AUDIENCE);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_wrong_issuer() {
        let claims = test_claims(Duration::minutes(60));
        let token = create_token(&claims, SECRET).expect("Should create token");

        let result = validate_token(&token, SECRET, "someone-else", AUDIENCE);
        assert!(matches!(result, Err(JwtError::InvalidIssuer)));
    }

    #[test]
    fn test_validate_wrong_audience() {
        let claims = test_claims(Duration::minutes(60));
        let token = create_token(&claims, SECRET).expect("Should create token");

        let result = validate_token(&token, SECRET, ISSUER, "other-clients");
        assert!(matches!(result, Err(JwtError::InvalidAudience)));
    }

    #[test]
    fn test_validate_garbage_token() {
        let result = validate_token("not.a.jwt", SECRET, ISSUER, AUDIENCE);
        assert!(result.is_err());
    }

    #[test]
    fn test_role_claim_round_trips() {
        let claims = Claims::new(
            7,
            "bob".to_string(),
            Role::User,
            ISSUER,
            AUDIENCE,
            Duration::minutes(60),
        );
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET, ISSUER, AUDIENCE).unwrap();
        assert_eq!(validated.role, Role::User);
    }
}
