use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::rating::{Rating, RatingValue, StoreRatingEntry, UpsertOutcome};
use crate::domain::repositories::{RatingRepository, RepositoryError, RepositoryResult};
use crate::domain::user::Email;

/// Internal row type for rating queries
#[derive(Debug, sqlx::FromRow)]
struct RatingRow {
    id: i64,
    user_id: i64,
    store_id: i64,
    value: i16,
}

impl TryFrom<RatingRow> for Rating {
    type Error = RepositoryError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            store_id: row.store_id,
            value: parse_value(row.value)?,
        })
    }
}

/// Row returned by the upsert; `inserted` is false when an existing row was updated
#[derive(Debug, sqlx::FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    rating: RatingRow,
    inserted: bool,
}

#[derive(Debug, sqlx::FromRow)]
struct StoreRatingRow {
    id: i64,
    value: i16,
    user_name: String,
    user_email: String,
}

impl TryFrom<StoreRatingRow> for StoreRatingEntry {
    type Error = RepositoryError;

    fn try_from(row: StoreRatingRow) -> Result<Self, Self::Error> {
        let user_email = Email::new(&row.user_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {}", e))
        })?;

        Ok(Self {
            id: row.id,
            value: parse_value(row.value)?,
            user_name: row.user_name,
            user_email,
        })
    }
}

fn parse_value(value: i16) -> Result<RatingValue, RepositoryError> {
    RatingValue::try_from(value).map_err(RepositoryError::DataCorruption)
}

/// PostgreSQL implementation of RatingRepository
///
/// The upsert is a single `INSERT .. ON CONFLICT` against the
/// `(user_id, store_id)` unique constraint, so concurrent submissions from
/// the same user for the same store can never produce two rows.
pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    /// Creates a new PostgresRatingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn upsert(
        &self,
        user_id: i64,
        store_id: i64,
        value: RatingValue,
    ) -> RepositoryResult<(Rating, UpsertOutcome)> {
        // xmax is zero only for a row version created by this statement's insert
        let row = sqlx::query_as::<_, UpsertRow>(
            r#"
            INSERT INTO ratings (user_id, store_id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, store_id) DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = NOW()
            RETURNING id, user_id, store_id, value, (xmax = 0) AS inserted
            "#,
        )
        .bind(user_id)
        .bind(store_id)
        .bind(i16::from(value))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_foreign_key_violation() {
                    return RepositoryError::NotFound(format!(
                        "user {} or store {}",
                        user_id, store_id
                    ));
                }
            }
            RepositoryError::Database(e)
        })?;

        let outcome = if row.inserted {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        };

        Ok((Rating::try_from(row.rating)?, outcome))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, user_id, store_id, value
            FROM ratings
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Rating::try_from).collect()
    }

    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT id, user_id, store_id, value
            FROM ratings
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Rating::try_from).collect()
    }

    async fn list_for_store(&self, store_id: i64) -> RepositoryResult<Vec<StoreRatingEntry>> {
        let rows = sqlx::query_as::<_, StoreRatingRow>(
            r#"
            SELECT r.id, r.value, u.name AS user_name, u.email AS user_email
            FROM ratings r
            JOIN users u ON u.id = r.user_id
            WHERE r.store_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StoreRatingEntry::try_from).collect()
    }
}
