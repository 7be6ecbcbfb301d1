use serde::{Deserialize, Serialize};
use std::fmt;

/// Email value object shared by user accounts and stores
///
/// # Invariants
/// - Surrounding whitespace is stripped and letters are lowercased, so
///   `A@X.com` and `a@x.com` are the same address
/// - Must contain '@' character
/// - Must be between 3 and 255 characters long
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    const MIN_LEN: usize = 3;
    /// Longest accepted address, in characters
    pub const MAX_LEN: usize = 255;

    /// Creates a new Email value object
    ///
    /// # Returns
    /// * `Ok(Email)` - If email is valid
    /// * `Err(String)` - If email is invalid
    ///
    /// # Example
    /// ```
    /// use store_ratings_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("  Alice@Example.com ").expect("valid email");
    /// assert_eq!(email.as_str(), "alice@example.com");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, String> {
        let email = email.as_ref().trim().to_lowercase();
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(format!("Invalid email: {}", email))
        }
    }

    fn is_valid(email: &str) -> bool {
        let len = email.chars().count();
        email.contains('@') && (Self::MIN_LEN..=Self::MAX_LEN).contains(&len)
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a user account
///
/// The set is closed: every role-dependent decision is an exhaustive match,
/// so adding a role surfaces every place that needs a decision.
///
/// On the wire roles use their display names ("System Administrator",
/// "Normal User", "Store Owner"); in the database they are the `user_role`
/// enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    /// Manages users, stores and sees every rating
    #[serde(rename = "System Administrator")]
    Administrator,
    /// Browses stores and submits ratings
    #[serde(rename = "Normal User")]
    Normal,
    /// Views the ratings of the store assigned to them
    #[serde(rename = "Store Owner")]
    StoreOwner,
}

impl Role {
    /// Returns true for the administrator role
    pub fn is_admin(&self) -> bool {
        match self {
            Role::Administrator => true,
            Role::Normal | Role::StoreOwner => false,
        }
    }

    /// Frontend dashboard a freshly authenticated user of this role lands on
    ///
    /// # Example
    /// ```
    /// use store_ratings_api::domain::user::value_objects::Role;
    ///
    /// assert_eq!(Role::StoreOwner.dashboard_path(), "/dashboard/store-owner");
    /// ```
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Administrator => "/dashboard/admin",
            Role::Normal => "/dashboard/user",
            Role::StoreOwner => "/dashboard/store-owner",
        }
    }

    /// Display name used in JSON bodies
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Administrator => "System Administrator",
            Role::Normal => "Normal User",
            Role::StoreOwner => "Store Owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!(Email::new("test@example.com").is_ok());
    }

    #[test]
    fn valid_email_minimum_length() {
        assert!(Email::new("a@b").is_ok());
    }

    #[test]
    fn email_is_trimmed() {
        let email = Email::new("  a@x.com\n").unwrap();
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn email_is_lowercased() {
        let email = Email::new("Alice@Example.COM").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
        assert_eq!(email, Email::new("alice@example.com").unwrap());
    }

    #[test]
    fn invalid_email_too_long() {
        let local = "a".repeat(Email::MAX_LEN - "@x.io".len());
        assert!(Email::new(format!("{}@x.io", local)).is_ok());
        assert!(Email::new(format!("{}a@x.io", local)).is_err());
    }

    #[test]
    fn invalid_email_no_at_symbol() {
        assert!(Email::new("invalid").is_err());
    }

    #[test]
    fn invalid_email_too_short() {
        assert!(Email::new("a@").is_err());
    }

    #[test]
    fn invalid_email_blank() {
        assert!(Email::new("").is_err());
        assert!(Email::new("   ").is_err());
    }

    #[test]
    fn email_serializes_as_plain_string() {
        let email = Email::new("a@x.com").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"a@x.com\"");
    }

    #[test]
    fn only_administrator_is_admin() {
        assert!(Role::Administrator.is_admin());
        assert!(!Role::Normal.is_admin());
        assert!(!Role::StoreOwner.is_admin());
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            "\"System Administrator\""
        );
        assert_eq!(serde_json::to_string(&Role::Normal).unwrap(), "\"Normal User\"");
        let parsed: Role = serde_json::from_str("\"Store Owner\"").unwrap();
        assert_eq!(parsed, Role::StoreOwner);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"Superuser\"").is_err());
    }

    #[test]
    fn each_role_has_its_own_dashboard() {
        assert_eq!(Role::Administrator.dashboard_path(), "/dashboard/admin");
        assert_eq!(Role::Normal.dashboard_path(), "/dashboard/user");
        assert_eq!(Role::StoreOwner.dashboard_path(), "/dashboard/store-owner");
    }

    #[test]
    fn role_display() {
        assert_eq!(Role::Normal.to_string(), "Normal User");
    }
}
