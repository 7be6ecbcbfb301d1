use std::sync::Arc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthSettings;
use crate::domain::repositories::{StoreRepository, UserRepository};
use crate::domain::store::{NewStore, Store};
use crate::domain::user::{Email, NewUser, Role, UserSummary};

use super::errors::{ServiceError, ServiceResult};
use super::{
    require_bounded, require_field, MAX_ADDRESS_LEN, MAX_STORE_NAME_LEN, MAX_USER_NAME_LEN,
};

/// Fields an administrator supplies to create an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub role: Role,
    pub store_id: Option<i64>,
}

/// Fields an administrator supplies to create a store
#[derive(Debug, Clone)]
pub struct NewStoreRequest {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Option<i64>,
}

/// User and store management plus self-service password changes
///
/// The admin guard runs in the HTTP layer before `add_user`, `list_users`
/// and `add_store` are reached. `change_password` is available to any
/// authenticated user and always acts on that user.
#[derive(Clone)]
pub struct AdministrationService {
    users: Arc<dyn UserRepository>,
    stores: Arc<dyn StoreRepository>,
    settings: Arc<AuthSettings>,
}

impl AdministrationService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        stores: Arc<dyn StoreRepository>,
        settings: Arc<AuthSettings>,
    ) -> Self {
        Self {
            users,
            stores,
            settings,
        }
    }

    /// Creates an account with any role
    pub async fn add_user(&self, account: NewAccount) -> ServiceResult<UserSummary> {
        let name = require_bounded("name", &account.name, MAX_USER_NAME_LEN)?;
        let address = require_bounded("address", &account.address, MAX_ADDRESS_LEN)?;
        require_field("password", &account.password)?;
        let email = Email::new(require_field("email", &account.email)?)
            .map_err(ServiceError::InvalidInput)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }

        let password_hash = hash_password(&account.password, self.settings.bcrypt_cost)?;

        let user = self
            .users
            .create(NewUser {
                name: name.to_string(),
                email,
                password_hash,
                address: address.to_string(),
                role: account.role,
                store_id: account.store_id,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "user added by administrator");

        Ok(user.summary())
    }

    /// Every account, without password hashes
    pub async fn list_users(&self) -> ServiceResult<Vec<UserSummary>> {
        let users = self.users.list().await?;
        Ok(users.iter().map(|u| u.summary()).collect())
    }

    /// Creates a store
    ///
    /// `owner_id` is stored as given; it is not checked against existing
    /// users or their roles.
    pub async fn add_store(&self, request: NewStoreRequest) -> ServiceResult<Store> {
        let name = require_bounded("name", &request.name, MAX_STORE_NAME_LEN)?;
        let address = require_bounded("address", &request.address, MAX_ADDRESS_LEN)?;
        let email = Email::new(require_field("email", &request.email)?)
            .map_err(ServiceError::InvalidInput)?;

        let store = self
            .stores
            .create(NewStore {
                name: name.to_string(),
                email,
                address: address.to_string(),
                owner_id: request.owner_id,
            })
            .await?;

        tracing::info!(store_id = store.id, owner_id = ?store.owner_id, "store added");

        Ok(store)
    }

    /// Replaces the acting user's password after checking the current one
    ///
    /// # Errors
    /// - `InvalidInput` if either password is empty
    /// - `InvalidCredentials` if `current_password` does not match
    pub async fn change_password(
        &self,
        actor_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Please provide current and new passwords".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_id(actor_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        if !verify_password(current_password, &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        let password_hash = hash_password(new_password, self.settings.bcrypt_cost)?;
        self.users.update_password(actor_id, &password_hash).await?;

        tracing::info!(user_id = actor_id, "password changed");

        Ok(())
    }
}
