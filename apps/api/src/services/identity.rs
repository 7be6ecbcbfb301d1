use std::sync::Arc;

use crate::auth::jwt::{create_token, verify_token};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::AuthSettings;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, NewUser, Role, User, UserSummary};

use super::errors::{ServiceError, ServiceResult};
use super::{require_bounded, require_field, MAX_ADDRESS_LEN, MAX_USER_NAME_LEN};

/// A freshly issued bearer token and the identity it belongs to
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: String,
    pub user: UserSummary,
}

/// Fields accepted by public registration
///
/// Carries no role: self-registered accounts are always Normal users.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
}

/// Login, registration and bearer-token verification
///
/// Stateless: every call goes to the user repository.
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    settings: Arc<AuthSettings>,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserRepository>, settings: Arc<AuthSettings>) -> Self {
        Self { users, settings }
    }

    /// Checks an email/password pair and issues a token
    ///
    /// Unknown emails and wrong passwords fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<IssuedCredential> {
        let email = Email::new(email).map_err(|_| ServiceError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "login rejected: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        self.issue(&user)
    }

    /// Creates a Normal-role account and logs it in
    pub async fn register(&self, registration: Registration) -> ServiceResult<IssuedCredential> {
        let name = require_bounded("name", &registration.name, MAX_USER_NAME_LEN)?;
        let address = require_bounded("address", &registration.address, MAX_ADDRESS_LEN)?;
        require_field("password", &registration.password)?;
        let email = Email::new(require_field("email", &registration.email)?)
            .map_err(ServiceError::InvalidInput)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }

        let password_hash = hash_password(&registration.password, self.settings.bcrypt_cost)?;

        // A concurrent registration can still slip past the lookup above;
        // the unique constraint turns that into DuplicateEmail too.
        let user = self
            .users
            .create(NewUser {
                name: name.to_string(),
                email,
                password_hash,
                address: address.to_string(),
                role: Role::Normal,
                store_id: None,
            })
            .await?;

        tracing::info!(user_id = user.id, "user registered");

        self.issue(&user)
    }

    /// Resolves a bearer token to the current state of its user
    ///
    /// The user is re-read on every call, so role or store changes apply
    /// from the next request on and deleted users lose access immediately.
    pub async fn verify_credential(&self, token: &str) -> ServiceResult<UserSummary> {
        let claims = verify_token(token, &self.settings.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            ServiceError::Unauthorized("token failed".to_string())
        })?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("user not found".to_string()))?;

        Ok(user.summary())
    }

    fn issue(&self, user: &User) -> ServiceResult<IssuedCredential> {
        let token = create_token(user.id, &self.settings.jwt_secret, self.settings.token_ttl)?;

        Ok(IssuedCredential {
            token,
            user: user.summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MIN_BCRYPT_COST;
    use crate::infrastructure::repositories::InMemoryStore;
    use chrono::Duration;

    const SECRET: &str = "identity-test-secret";

    fn service() -> (IdentityService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let settings = Arc::new(AuthSettings::new(SECRET, Duration::hours(1), MIN_BCRYPT_COST));
        (IdentityService::new(store.clone(), settings), store)
    }

    fn alice() -> Registration {
        Registration {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            password: "Secret1!".to_string(),
            address: "Addr".to_string(),
        }
    }

    #[tokio::test]
    async fn register_forces_normal_role() {
        let (identity, _) = service();

        let issued = identity.register(alice()).await.unwrap();
        assert_eq!(issued.user.role, Role::Normal);
        assert_eq!(issued.user.store_id, None);
        assert!(!issued.token.is_empty());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let (identity, _) = service();
        identity.register(alice()).await.unwrap();

        let result = identity.register(alice()).await;
        assert!(matches!(result, Err(ServiceError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn register_rejects_empty_fields() {
        let (identity, _) = service();

        for registration in [
            Registration { name: String::new(), ..alice() },
            Registration { email: " ".to_string(), ..alice() },
            Registration { password: String::new(), ..alice() },
            Registration { address: String::new(), ..alice() },
        ] {
            let result = identity.register(registration).await;
            assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn register_treats_email_case_insensitively() {
        let (identity, _) = service();
        identity.register(alice()).await.unwrap();

        let result = identity
            .register(Registration { email: "A@X.COM".to_string(), ..alice() })
            .await;
        assert!(matches!(result, Err(ServiceError::DuplicateEmail)));

        let issued = identity.authenticate("A@x.Com", "Secret1!").await.unwrap();
        assert_eq!(issued.user.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn register_rejects_overlong_fields() {
        let (identity, store) = service();

        let long_name = identity
            .register(Registration { name: "n".repeat(61), ..alice() })
            .await;
        assert!(matches!(long_name, Err(ServiceError::InvalidInput(_))));

        let long_address = identity
            .register(Registration { address: "a".repeat(401), ..alice() })
            .await;
        assert!(matches!(long_address, Err(ServiceError::InvalidInput(_))));

        assert!(UserRepository::list(store.as_ref()).await.unwrap().is_empty());

        let at_limits = identity
            .register(Registration {
                name: "n".repeat(60),
                address: "a".repeat(400),
                ..alice()
            })
            .await;
        assert!(at_limits.is_ok());
    }

    #[tokio::test]
    async fn register_rejects_malformed_email() {
        let (identity, _) = service();

        let result = identity
            .register(Registration { email: "not-an-email".to_string(), ..alice() })
            .await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn register_stores_a_hash_not_the_password() {
        let (identity, store) = service();
        let issued = identity.register(alice()).await.unwrap();

        let stored = UserRepository::find_by_id(store.as_ref(), issued.user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Secret1!");
        assert!(verify_password("Secret1!", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn authenticate_with_correct_password() {
        let (identity, _) = service();
        let registered = identity.register(alice()).await.unwrap();

        let issued = identity.authenticate("a@x.com", "Secret1!").await.unwrap();
        assert_eq!(issued.user, registered.user);
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password_and_unknown_email() {
        let (identity, _) = service();
        identity.register(alice()).await.unwrap();

        let wrong = identity.authenticate("a@x.com", "wrong").await;
        assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));

        let unknown = identity.authenticate("nobody@x.com", "Secret1!").await;
        assert!(matches!(unknown, Err(ServiceError::InvalidCredentials)));

        let malformed = identity.authenticate("nobody", "Secret1!").await;
        assert!(matches!(malformed, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn verify_credential_resolves_issued_token() {
        let (identity, _) = service();
        let issued = identity.register(alice()).await.unwrap();

        let user = identity.verify_credential(&issued.token).await.unwrap();
        assert_eq!(user, issued.user);
    }

    #[tokio::test]
    async fn verify_credential_rejects_bad_tokens() {
        let (identity, _) = service();

        let garbage = identity.verify_credential("garbage").await;
        assert!(matches!(garbage, Err(ServiceError::Unauthorized(_))));

        let foreign = create_token(1, "some-other-secret", Duration::hours(1)).unwrap();
        let result = identity.verify_credential(&foreign).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized(_))));

        let expired = create_token(1, SECRET, Duration::hours(-2)).unwrap();
        let result = identity.verify_credential(&expired).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn verify_credential_rejects_token_for_missing_user() {
        let (identity, _) = service();

        let token = create_token(404, SECRET, Duration::hours(1)).unwrap();
        let result = identity.verify_credential(&token).await;
        assert!(matches!(result, Err(ServiceError::Unauthorized(_))));
    }
}
