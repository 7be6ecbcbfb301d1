use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::rating::{average, Rating, RatingValue, StoreRatingEntry, UpsertOutcome};
use crate::domain::repositories::{
    RatingRepository, RepositoryError, RepositoryResult, StoreRepository, UserRepository,
};
use crate::domain::store::{NewStore, Store, StoreWithRating};
use crate::domain::user::{Email, NewUser, User};

/// Row storage plus the id sequences, mirroring the Postgres schema
#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    stores: BTreeMap<i64, Store>,
    ratings: BTreeMap<i64, Rating>,
    user_seq: i64,
    store_seq: i64,
    rating_seq: i64,
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

impl Tables {
    fn ratings_for_store(&self, store_id: i64) -> impl Iterator<Item = &Rating> {
        self.ratings
            .values()
            .filter(move |rating| rating.store_id == store_id)
    }
}

/// In-process implementation of every repository trait
///
/// Used by the test suites and for running the API without a database.
/// All tables sit behind one `RwLock`, so each operation (the rating upsert
/// included) sees and leaves a consistent state, the way a single SQL
/// statement would. It enforces the same constraints as the schema: unique
/// user email, unique (user, store) rating, and ratings referencing existing
/// users and stores. Ids start at 1 and are never reused.
///
/// Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_string()));
        }

        let id = next_id(&mut tables.user_seq);
        let user = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            address: user.address,
            role: user.role,
            store_id: user.store_id,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", id)))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}

#[async_trait]
impl StoreRepository for InMemoryStore {
    async fn create(&self, store: NewStore) -> RepositoryResult<Store> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.store_seq);
        let store = Store {
            id,
            name: store.name,
            email: store.email,
            address: store.address,
            owner_id: store.owner_id,
        };
        tables.stores.insert(id, store.clone());
        Ok(store)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Store>> {
        Ok(self.tables.read().await.stores.get(&id).cloned())
    }

    async fn list_with_ratings(&self) -> RepositoryResult<Vec<StoreWithRating>> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .values()
            .map(|store| StoreWithRating {
                store: store.clone(),
                average_rating: average(tables.ratings_for_store(store.id).map(|r| r.value)),
            })
            .collect())
    }
}

#[async_trait]
impl RatingRepository for InMemoryStore {
    async fn upsert(
        &self,
        user_id: i64,
        store_id: i64,
        value: RatingValue,
    ) -> RepositoryResult<(Rating, UpsertOutcome)> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) || !tables.stores.contains_key(&store_id) {
            return Err(RepositoryError::NotFound(format!(
                "user {} or store {}",
                user_id, store_id
            )));
        }

        let existing = tables
            .ratings
            .values_mut()
            .find(|r| r.user_id == user_id && r.store_id == store_id);

        if let Some(rating) = existing {
            rating.value = value;
            return Ok((rating.clone(), UpsertOutcome::Updated));
        }

        let id = next_id(&mut tables.rating_seq);
        let rating = Rating {
            id,
            user_id,
            store_id,
            value,
        };
        tables.ratings.insert(id, rating.clone());
        Ok((rating, UpsertOutcome::Created))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Rating>> {
        Ok(self.tables.read().await.ratings.values().cloned().collect())
    }

    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Rating>> {
        Ok(self
            .tables
            .read()
            .await
            .ratings
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_for_store(&self, store_id: i64) -> RepositoryResult<Vec<StoreRatingEntry>> {
        let tables = self.tables.read().await;
        tables
            .ratings_for_store(store_id)
            .map(|rating| -> RepositoryResult<StoreRatingEntry> {
                let rater = tables.users.get(&rating.user_id).ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "rating {} references missing user {}",
                        rating.id, rating.user_id
                    ))
                })?;
                Ok(StoreRatingEntry {
                    id: rating.id,
                    value: rating.value,
                    user_name: rater.name.clone(),
                    user_email: rater.email.clone(),
                })
            })
            .collect()
    }
}
