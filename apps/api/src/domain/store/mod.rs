// Store domain module

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::user::Email;

/// A store users can rate
///
/// `owner_id` points at a store-owner account by convention only; nothing
/// checks that the user exists, has the StoreOwner role, or points back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub email: Email,
    pub address: String,
    pub owner_id: Option<i64>,
}

/// A store about to be inserted
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub email: Email,
    pub address: String,
    pub owner_id: Option<i64>,
}

/// A store together with the mean of its current ratings
///
/// `average_rating` is `None` (JSON `null`) for an unrated store, never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreWithRating {
    #[serde(flatten)]
    pub store: Store,
    pub average_rating: Option<Decimal>,
}
