use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::user::{Email, NewUser, User};

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    ///
    /// Fails with `RepositoryError::Conflict` if the email is already taken.
    async fn create(&self, user: NewUser) -> RepositoryResult<User>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;

    /// All users, ordered by ID
    async fn list(&self) -> RepositoryResult<Vec<User>>;

    /// Replace a user's password hash
    ///
    /// Fails with `RepositoryError::NotFound` if the user does not exist.
    async fn update_password(&self, id: i64, password_hash: &str) -> RepositoryResult<()>;
}
