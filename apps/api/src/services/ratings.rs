use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::rating::{average, Rating, RatingValue, StoreRatingEntry, UpsertOutcome};
use crate::domain::repositories::{RatingRepository, StoreRepository};
use crate::domain::store::StoreWithRating;

use super::errors::{ServiceError, ServiceResult};

/// Ratings on one store plus their mean, for the store-owner view
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRatings {
    pub ratings: Vec<StoreRatingEntry>,
    /// `None` when the store has no ratings
    pub average_rating: Option<Decimal>,
}

/// Rating submission and aggregation
///
/// Averages are never stored; every read recomputes them from the current
/// ratings, so a submission is visible to the very next read.
#[derive(Clone)]
pub struct RatingService {
    ratings: Arc<dyn RatingRepository>,
    stores: Arc<dyn StoreRepository>,
}

impl RatingService {
    pub fn new(ratings: Arc<dyn RatingRepository>, stores: Arc<dyn StoreRepository>) -> Self {
        Self { ratings, stores }
    }

    /// Records `actor_id`'s rating of a store, replacing any earlier one
    ///
    /// `actor_id` must come from the verified identity, never from the
    /// request body. Returns whether the rating was created or updated.
    ///
    /// # Errors
    /// - `InvalidInput` if the store id or value is missing, or the value is
    ///   outside 1-5
    /// - `NotFound` if the store does not exist
    pub async fn submit(
        &self,
        actor_id: i64,
        store_id: Option<i64>,
        value: Option<i64>,
    ) -> ServiceResult<(Rating, UpsertOutcome)> {
        let (store_id, value) = match (store_id, value) {
            (Some(store_id), Some(value)) => (store_id, value),
            _ => {
                return Err(ServiceError::InvalidInput(
                    "Store ID and rating value are required".to_string(),
                ))
            }
        };
        let value = RatingValue::new(value).map_err(ServiceError::InvalidInput)?;

        self.require_store(store_id).await?;

        let (rating, outcome) = self.ratings.upsert(actor_id, store_id, value).await?;

        tracing::info!(
            rating_id = rating.id,
            user_id = actor_id,
            store_id,
            value = %rating.value,
            ?outcome,
            "rating submitted"
        );

        Ok((rating, outcome))
    }

    /// Ratings on a store with each rater's name and email, plus the mean
    ///
    /// The mean is taken over the returned entries, so the two always agree.
    pub async fn store_ratings(&self, store_id: i64) -> ServiceResult<StoreRatings> {
        self.require_store(store_id).await?;

        let ratings = self.ratings.list_for_store(store_id).await?;
        let average_rating = average(ratings.iter().map(|entry| entry.value));

        Ok(StoreRatings {
            ratings,
            average_rating,
        })
    }

    /// Every store with its current mean rating
    pub async fn list_stores(&self) -> ServiceResult<Vec<StoreWithRating>> {
        Ok(self.stores.list_with_ratings().await?)
    }

    /// Ratings submitted by the acting user, and only those
    pub async fn user_ratings(&self, actor_id: i64) -> ServiceResult<Vec<Rating>> {
        Ok(self.ratings.list_by_user(actor_id).await?)
    }

    /// Every rating in the system; callers gate this behind the admin guard
    pub async fn all_ratings(&self) -> ServiceResult<Vec<Rating>> {
        Ok(self.ratings.list_all().await?)
    }

    async fn require_store(&self, store_id: i64) -> ServiceResult<()> {
        match self.stores.find_by_id(store_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(format!("Store not found: {}", store_id))),
        }
    }
}
