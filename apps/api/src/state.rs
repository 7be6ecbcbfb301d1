//! Application state shared across handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::AuthSettings;
use crate::domain::repositories::{RatingRepository, StoreRepository, UserRepository};
use crate::infrastructure::repositories::{
    InMemoryStore, PostgresRatingRepository, PostgresStoreRepository, PostgresUserRepository,
};
use crate::services::{AdministrationService, IdentityService, RatingService};

/// Repository handles plus auth settings; cheap to clone per request
#[derive(Clone)]
pub struct AppState {
    users: Arc<dyn UserRepository>,
    stores: Arc<dyn StoreRepository>,
    ratings: Arc<dyn RatingRepository>,
    auth: Arc<AuthSettings>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        stores: Arc<dyn StoreRepository>,
        ratings: Arc<dyn RatingRepository>,
        auth: AuthSettings,
    ) -> Self {
        Self {
            users,
            stores,
            ratings,
            auth: Arc::new(auth),
        }
    }

    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, auth: AuthSettings) -> Self {
        Self::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresStoreRepository::new(pool.clone())),
            Arc::new(PostgresRatingRepository::new(pool)),
            auth,
        )
    }

    /// State backed by a fresh in-process store
    pub fn in_memory(auth: AuthSettings) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store.clone(), store, auth)
    }

    pub fn identity(&self) -> IdentityService {
        IdentityService::new(self.users.clone(), self.auth.clone())
    }

    pub fn rating_service(&self) -> RatingService {
        RatingService::new(self.ratings.clone(), self.stores.clone())
    }

    pub fn administration(&self) -> AdministrationService {
        AdministrationService::new(self.users.clone(), self.stores.clone(), self.auth.clone())
    }
}
