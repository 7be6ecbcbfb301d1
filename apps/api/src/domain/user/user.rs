use serde::Serialize;

use super::value_objects::{Email, Role};

/// A persisted user account
///
/// Carries the password hash, so it never leaves the service layer; callers
/// outside it get a [`UserSummary`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub address: String,
    pub role: Role,
    /// Only meaningful for store owners
    pub store_id: Option<i64>,
}

impl User {
    /// Strips the password hash
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            role: self.role,
            store_id: self.store_id,
        }
    }
}

/// A user account about to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub address: String,
    pub role: Role,
    pub store_id: Option<i64>,
}

/// Outward-facing identity of a user
///
/// This is what authenticated requests carry around and what every endpoint
/// returns for a user. There is no password field to leak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: Email,
    pub address: String,
    pub role: Role,
    pub store_id: Option<i64>,
}
