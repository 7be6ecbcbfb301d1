//! Integration tests for repository layer
//!
//! These tests verify that the PostgreSQL repositories behave like the
//! in-memory store: unique emails, the one-rating-per-user-per-store upsert
//! and aggregate averages. Each test gets a fresh database with migrations
//! applied.
//!
//! Run with `DATABASE_URL` pointing at a server the tests may create
//! databases on:
//! `cargo test --test repository_integration -- --ignored`

use rust_decimal::Decimal;
use sqlx::PgPool;
use store_ratings_api::auth::password::hash_password;
use store_ratings_api::auth::MIN_BCRYPT_COST;
use store_ratings_api::domain::rating::{RatingValue, UpsertOutcome};
use store_ratings_api::domain::repositories::{
    RatingRepository, RepositoryError, StoreRepository, UserRepository,
};
use store_ratings_api::domain::store::{NewStore, Store};
use store_ratings_api::domain::user::{Email, NewUser, Role, User};
use store_ratings_api::infrastructure::repositories::{
    PostgresRatingRepository, PostgresStoreRepository, PostgresUserRepository,
};

fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        email: Email::new(email).expect("valid email"),
        password_hash: hash_password("testpass", MIN_BCRYPT_COST).expect("hash password"),
        address: "1 Test Road".to_string(),
        role,
        store_id: None,
    }
}

async fn create_user(pool: &PgPool, email: &str) -> User {
    PostgresUserRepository::new(pool.clone())
        .create(new_user(email, Role::Normal))
        .await
        .expect("Failed to create test user")
}

async fn create_store(pool: &PgPool, name: &str) -> Store {
    PostgresStoreRepository::new(pool.clone())
        .create(NewStore {
            name: name.to_string(),
            email: Email::new(format!("{}@shops.test", name.to_lowercase())).unwrap(),
            address: "Main St".to_string(),
            owner_id: None,
        })
        .await
        .expect("Failed to create test store")
}

fn rating(value: i64) -> RatingValue {
    RatingValue::new(value).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_repository_create_and_find_by_email(pool: PgPool) {
    let repo = PostgresUserRepository::new(pool);

    let created = repo
        .create(new_user("alice@example.com", Role::StoreOwner))
        .await
        .expect("Failed to create user");

    let email = Email::new("alice@example.com").unwrap();
    let found = repo
        .find_by_email(&email)
        .await
        .expect("Failed to query user")
        .expect("User should exist");

    assert_eq!(found.summary(), created.summary());
    assert_eq!(found.role, Role::StoreOwner);

    let missing = Email::new("nobody@example.com").unwrap();
    assert!(repo.find_by_email(&missing).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_repository_rejects_duplicate_email(pool: PgPool) {
    let repo = PostgresUserRepository::new(pool);
    repo.create(new_user("dup@example.com", Role::Normal))
        .await
        .unwrap();

    let result = repo.create(new_user("dup@example.com", Role::Normal)).await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_repository_update_password(pool: PgPool) {
    let repo = PostgresUserRepository::new(pool.clone());
    let user = create_user(&pool, "pw@example.com").await;

    repo.update_password(user.id, "new-hash").await.unwrap();
    let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "new-hash");

    let result = repo.update_password(user.id + 1000, "new-hash").await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_rating_upsert_overwrites_in_place(pool: PgPool) {
    let ratings = PostgresRatingRepository::new(pool.clone());
    let user = create_user(&pool, "rater@example.com").await;
    let store = create_store(&pool, "Shop").await;

    let (first, outcome) = ratings.upsert(user.id, store.id, rating(4)).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Created);

    let (second, outcome) = ratings.upsert(user.id, store.id, rating(2)).await.unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated);
    assert_eq!(second.id, first.id);
    assert_eq!(second.value, rating(2));

    let all = ratings.list_all().await.unwrap();
    assert_eq!(all.len(), 1);

    let listed = PostgresStoreRepository::new(pool).list_with_ratings().await.unwrap();
    assert_eq!(listed[0].average_rating, Some(Decimal::from(2)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_rating_upsert_rejects_unknown_store(pool: PgPool) {
    let ratings = PostgresRatingRepository::new(pool.clone());
    let user = create_user(&pool, "rater@example.com").await;

    let result = ratings.upsert(user.id, 4242, rating(3)).await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    assert!(ratings.list_all().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_upserts_leave_one_rating(pool: PgPool) {
    let user = create_user(&pool, "racer@example.com").await;
    let store = create_store(&pool, "Shop").await;

    let handles: Vec<_> = (1..=5)
        .map(|value| {
            let repo = PostgresRatingRepository::new(pool.clone());
            let (user_id, store_id) = (user.id, store.id);
            tokio::spawn(async move { repo.upsert(user_id, store_id, rating(value)).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let (_, outcome) = handle.await.unwrap().unwrap();
        if outcome == UpsertOutcome::Created {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    let ratings = PostgresRatingRepository::new(pool);
    assert_eq!(ratings.list_by_user(user.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_store_averages_and_rater_details(pool: PgPool) {
    let ratings = PostgresRatingRepository::new(pool.clone());
    let stores = PostgresStoreRepository::new(pool.clone());
    let alice = create_user(&pool, "alice@example.com").await;
    let bob = create_user(&pool, "bob@example.com").await;
    let rated = create_store(&pool, "Rated").await;
    let unrated = create_store(&pool, "Unrated").await;

    ratings.upsert(alice.id, rated.id, rating(4)).await.unwrap();
    ratings.upsert(bob.id, rated.id, rating(5)).await.unwrap();

    let listed = stores.list_with_ratings().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].store, rated);
    assert_eq!(listed[0].average_rating, Some(Decimal::new(45, 1)));
    assert_eq!(listed[1].store, unrated);
    assert_eq!(listed[1].average_rating, None);

    assert!(ratings.list_for_store(unrated.id).await.unwrap().is_empty());

    let entries = ratings.list_for_store(rated.id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries
        .iter()
        .any(|entry| entry.user_email == alice.email && entry.value == rating(4)));

    let bobs = ratings.list_by_user(bob.id).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].user_id, bob.id);
}
