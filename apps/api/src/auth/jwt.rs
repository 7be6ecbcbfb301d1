// JWT token creation and verification
// Tokens carry the user id and expire after the configured lifetime

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user id)
/// * `iat` - Issued-at time (seconds since epoch)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject)
    pub sub: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiry timestamp
    pub exp: i64,
}

/// Creates a JWT token for a user
///
/// # Arguments
/// * `user_id` - The user's ID to include in the token
/// * `secret` - The secret key for signing
/// * `ttl` - How long the token stays valid
///
/// # Token Properties
/// - Signed with HS256 algorithm
/// - Contains user_id in 'sub' claim
///
/// # Example
/// ```
/// use chrono::Duration;
/// use store_ratings_api::auth::jwt::create_token;
///
/// let token = create_token(42, "your-secret-key", Duration::hours(8)).expect("valid token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_token(user_id: i64, secret: &str, ttl: Duration) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

/// Verifies and decodes a JWT token
///
/// Fails on a bad signature, a malformed token, or an expired `exp`.
///
/// # Example
/// ```
/// use chrono::Duration;
/// use store_ratings_api::auth::jwt::{create_token, verify_token};
///
/// let token = create_token(42, "your-secret-key", Duration::hours(8)).unwrap();
/// let claims = verify_token(&token, "your-secret-key").expect("valid token");
/// assert_eq!(claims.sub, 42);
/// ```
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    #[test]
    fn create_and_verify_token() {
        let token = create_token(17, TEST_SECRET, Duration::hours(8)).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.sub, 17);
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token(17, TEST_SECRET, Duration::hours(8)).expect("valid token");

        assert!(verify_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn invalid_token_fails() {
        assert!(verify_token("invalid.token.string", TEST_SECRET).is_err());
        assert!(verify_token("", TEST_SECRET).is_err());
    }

    #[test]
    fn expired_token_fails() {
        // Well past the default 60 second leeway
        let token = create_token(17, TEST_SECRET, Duration::hours(-2)).expect("valid token");

        assert!(verify_token(&token, TEST_SECRET).is_err());
    }

    #[test]
    fn token_expiry_follows_ttl() {
        let token = create_token(17, TEST_SECRET, Duration::days(30)).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        let now = Utc::now().timestamp();
        let in_30_days = (Utc::now() + Duration::days(30)).timestamp();

        assert!(claims.exp > now);
        assert!(claims.exp <= in_30_days + 10);
        assert!(claims.iat <= now + 10);
    }
}
