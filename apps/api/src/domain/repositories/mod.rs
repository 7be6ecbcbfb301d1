// Repository contracts (ports)
// Implemented by the adapters in crate::infrastructure::repositories

pub mod rating_repository;
pub mod store_repository;
pub mod user_repository;

use thiserror::Error;

pub use rating_repository::RatingRepository;
pub use store_repository::StoreRepository;
pub use user_repository::UserRepository;

/// Errors that can occur during repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unique constraint violated (e.g. email already taken)
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A referenced row does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Data in the store is invalid (e.g. a malformed email or rating value)
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
