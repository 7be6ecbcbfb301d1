use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::store::{NewStore, Store, StoreWithRating};

/// Repository trait for stores
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Insert a new store
    async fn create(&self, store: NewStore) -> RepositoryResult<Store>;

    /// Find a store by ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Store>>;

    /// Every store with the mean of its current ratings, ordered by ID
    ///
    /// The average is computed at read time; unrated stores get `None`.
    async fn list_with_ratings(&self) -> RepositoryResult<Vec<StoreWithRating>>;
}
