use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::repositories::{RepositoryError, RepositoryResult, StoreRepository};
use crate::domain::store::{NewStore, Store, StoreWithRating};
use crate::domain::user::Email;

/// Internal row type for store queries
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i64,
    name: String,
    email: String,
    address: String,
    owner_id: Option<i64>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid store email in database: {}", e))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            address: row.address,
            owner_id: row.owner_id,
        })
    }
}

/// Store row joined with its aggregated rating
#[derive(Debug, sqlx::FromRow)]
struct StoreWithRatingRow {
    #[sqlx(flatten)]
    store: StoreRow,
    average_rating: Option<Decimal>,
}

/// PostgreSQL implementation of StoreRepository
///
/// Averages come from `AVG()` over a LEFT JOIN on every read, so they always
/// reflect the ratings committed so far.
pub struct PostgresStoreRepository {
    pool: PgPool,
}

impl PostgresStoreRepository {
    /// Creates a new PostgresStoreRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PostgresStoreRepository {
    async fn create(&self, store: NewStore) -> RepositoryResult<Store> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            INSERT INTO stores (name, email, address, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, address, owner_id
            "#,
        )
        .bind(&store.name)
        .bind(store.email.as_str())
        .bind(&store.address)
        .bind(store.owner_id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Store>> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            SELECT id, name, email, address, owner_id
            FROM stores
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Store::try_from).transpose()
    }

    async fn list_with_ratings(&self) -> RepositoryResult<Vec<StoreWithRating>> {
        let rows = sqlx::query_as::<_, StoreWithRatingRow>(
            r#"
            SELECT
                s.id, s.name, s.email, s.address, s.owner_id,
                AVG(r.value) AS average_rating
            FROM stores s
            LEFT JOIN ratings r ON r.store_id = s.id
            GROUP BY s.id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> RepositoryResult<StoreWithRating> {
                Ok(StoreWithRating {
                    store: Store::try_from(row.store)?,
                    average_rating: row.average_rating.map(|avg| avg.normalize()),
                })
            })
            .collect()
    }
}
