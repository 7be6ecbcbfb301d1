// Role checks applied after the identity has been verified

use crate::domain::user::{Role, UserSummary};

use super::errors::{ServiceError, ServiceResult};

/// Fails with `Forbidden` unless the identity has exactly `role`
pub fn require_role(identity: &UserSummary, role: Role) -> ServiceResult<()> {
    if identity.role == role {
        return Ok(());
    }

    tracing::debug!(
        user_id = identity.id,
        role = %identity.role,
        required = %role,
        "role check failed"
    );

    Err(ServiceError::Forbidden(match role {
        Role::Administrator => "Not authorized as an admin".to_string(),
        Role::Normal | Role::StoreOwner => format!("Not authorized, requires role {}", role),
    }))
}

/// Shorthand for the administrator guard level
pub fn require_admin(identity: &UserSummary) -> ServiceResult<()> {
    require_role(identity, Role::Administrator)
}
