use serde::Serialize;
use std::fmt;

use crate::domain::user::Email;

/// A star rating between 1 and 5 inclusive
///
/// # Example
/// ```
/// use store_ratings_api::domain::rating::RatingValue;
///
/// assert_eq!(RatingValue::new(4).unwrap().get(), 4);
/// assert!(RatingValue::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates a raw value
    pub fn new(value: i64) -> Result<Self, String> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(RatingValue(value as u8))
        } else {
            Err(format!(
                "Rating value must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            ))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i16> for RatingValue {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<RatingValue> for i16 {
    fn from(value: RatingValue) -> Self {
        i16::from(value.0)
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user's rating of one store
///
/// At most one exists per (user_id, store_id). Once created only `value`
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub store_id: i64,
    pub value: RatingValue,
}

/// Whether an upsert inserted a new rating or overwrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// A rating on a store joined with who gave it, for the store-owner view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRatingEntry {
    pub id: i64,
    pub value: RatingValue,
    pub user_name: String,
    pub user_email: Email,
}
