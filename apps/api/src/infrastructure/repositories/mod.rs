// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_rating_repository;
pub mod postgres_store_repository;
pub mod postgres_user_repository;

pub use in_memory::InMemoryStore;
pub use postgres_rating_repository::PostgresRatingRepository;
pub use postgres_store_repository::PostgresStoreRepository;
pub use postgres_user_repository::PostgresUserRepository;
