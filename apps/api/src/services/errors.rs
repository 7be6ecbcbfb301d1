use thiserror::Error;

use crate::auth::AuthError;
use crate::domain::repositories::RepositoryError;

/// Business-level failures of the identity, authorization, rating and
/// administration services
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed fields, out-of-range rating value
    #[error("{0}")]
    InvalidInput(String),

    #[error("User with this email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed or expired token, or a token for a deleted user
    #[error("Not authorized, {0}")]
    Unauthorized(String),

    /// Authenticated but the role does not allow the operation
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Persistence or other unexpected failure; never shown to clients
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => ServiceError::DuplicateEmail,
            RepositoryError::NotFound(what) => ServiceError::NotFound(format!("Not found: {}", what)),
            RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                ServiceError::Internal(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
