// Application services
// Stateless request processors between the HTTP adapter and the repositories

pub mod administration;
pub mod authorization;
pub mod errors;
pub mod identity;
pub mod ratings;

pub use administration::{AdministrationService, NewAccount, NewStoreRequest};
pub use errors::{ServiceError, ServiceResult};
pub use identity::{IdentityService, IssuedCredential, Registration};
pub use ratings::{RatingService, StoreRatings};

/// Longest user display name, in characters
pub const MAX_USER_NAME_LEN: usize = 60;
/// Longest store name, in characters
pub const MAX_STORE_NAME_LEN: usize = 255;
/// Longest postal address, in characters
pub const MAX_ADDRESS_LEN: usize = 400;

/// Returns the trimmed value, or `InvalidInput` naming the blank field
fn require_field<'a>(field: &str, value: &'a str) -> ServiceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed)
}

/// Like [`require_field`], also rejecting values longer than `max` characters
fn require_bounded<'a>(field: &str, value: &'a str, max: usize) -> ServiceResult<&'a str> {
    let trimmed = require_field(field, value)?;
    if trimmed.chars().count() > max {
        return Err(ServiceError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_field_trims() {
        assert_eq!(require_field("name", "  Alice ").unwrap(), "Alice");
    }

    #[test]
    fn require_field_rejects_blank() {
        let err = require_field("address", " \t").unwrap_err();
        assert_eq!(err.to_string(), "address is required");
    }

    #[test]
    fn require_bounded_counts_characters() {
        let at_limit = "é".repeat(MAX_USER_NAME_LEN);
        assert!(require_bounded("name", &at_limit, MAX_USER_NAME_LEN).is_ok());

        let over = "a".repeat(MAX_USER_NAME_LEN + 1);
        let err = require_bounded("name", &over, MAX_USER_NAME_LEN).unwrap_err();
        assert_eq!(err.to_string(), "name must be at most 60 characters");
    }
}
