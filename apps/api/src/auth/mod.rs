// Authentication primitives
// Password hashing (bcrypt) and signed bearer tokens (JWT)

pub mod jwt;
pub mod password;

use chrono::Duration;
use std::fmt;
use thiserror::Error;

/// Lowest bcrypt work factor the hasher accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest bcrypt work factor the hasher accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// Errors raised by the hashing and token primitives
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Settings for issuing credentials and hashing passwords
///
/// Implements `Debug` manually to redact the signing secret.
#[derive(Clone)]
pub struct AuthSettings {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Lifetime of an issued token
    pub token_ttl: Duration,
    /// bcrypt work factor (4-31)
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
            bcrypt_cost,
        }
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
