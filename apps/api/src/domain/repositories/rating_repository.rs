use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::rating::{Rating, RatingValue, StoreRatingEntry, UpsertOutcome};

/// Repository trait for ratings
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert or overwrite the rating keyed on (user_id, store_id)
    ///
    /// Must be atomic: concurrent calls for the same pair leave exactly one
    /// row. An existing rating keeps its ID; only the value changes.
    async fn upsert(
        &self,
        user_id: i64,
        store_id: i64,
        value: RatingValue,
    ) -> RepositoryResult<(Rating, UpsertOutcome)>;

    /// Every rating, ordered by ID
    async fn list_all(&self) -> RepositoryResult<Vec<Rating>>;

    /// Ratings submitted by one user, ordered by ID
    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Rating>>;

    /// Ratings on one store joined with the rater's name and email
    async fn list_for_store(&self, store_id: i64) -> RepositoryResult<Vec<StoreRatingEntry>>;
}
